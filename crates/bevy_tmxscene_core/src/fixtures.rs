//! On-disk map fixtures shared by tests.

use std::fs;
use std::path::{Path, PathBuf};

/// 32x32 opaque RGBA PNG.
pub(crate) const ATLAS_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x20, 0x08, 0x06, 0x00, 0x00, 0x00, 0x73, 0x7a, 0x7a,
    0xf4, 0x00, 0x00, 0x00, 0x2f, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0xed, 0xce, 0x21, 0x01, 0x00,
    0x00, 0x08, 0x03, 0x30, 0xe2, 0x10, 0x91, 0x88, 0xb4, 0x82, 0x18, 0x37, 0x13, 0xf3, 0xab, 0x9d,
    0xbe, 0xa4, 0x12, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10,
    0x10, 0x48, 0x07, 0x1e, 0xb0, 0x73, 0x9c, 0x88, 0x59, 0x3b, 0xfa, 0x97, 0x00, 0x00, 0x00, 0x00,
    0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// 8x4 opaque RGBA PNG.
pub(crate) const BACKGROUND_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x04, 0x08, 0x06, 0x00, 0x00, 0x00, 0xb3, 0xcd, 0x7e,
    0xf0, 0x00, 0x00, 0x00, 0x12, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x90, 0xb3, 0x39, 0xf1,
    0x1f, 0x1f, 0x66, 0xa0, 0xbd, 0x02, 0x00, 0x5e, 0xd3, 0x44, 0x21, 0xde, 0xdf, 0x84, 0xf7, 0x00,
    0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

const LEVEL_MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" renderorder="right-down" width="3" height="1" tilewidth="16" tileheight="16" infinite="0" nextlayerid="3" nextobjectid="1">
 <tileset firstgid="1" source="../tilesets/terrain.tsx"/>
 <layer id="1" name="ground" width="3" height="1">
  <data encoding="csv">
1,0,2
</data>
 </layer>
 <imagelayer id="2" name="backdrop" opacity="0.5">
  <image source="../img/bg.png" width="8" height="4"/>
 </imagelayer>
</map>
"#;

const TERRAIN_TILESET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.10" name="terrain" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <image source="atlas.png" width="32" height="32"/>
 <tile id="0">
  <objectgroup draworder="index" id="2">
   <object id="1" x="0" y="0" width="16" height="16"/>
  </objectgroup>
 </tile>
</tileset>
"#;

const MARKERS_MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" renderorder="right-down" width="4" height="4" tilewidth="16" tileheight="16" infinite="0" nextlayerid="2" nextobjectid="3">
 <objectgroup id="1" name="markers">
  <object id="1" name="spawn" x="16" y="32">
   <point/>
  </object>
  <object id="2" name="exit" x="48" y="8" width="8" height="8"/>
 </objectgroup>
</map>
"#;

const ISOMETRIC_MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="isometric" renderorder="right-down" width="1" height="1" tilewidth="32" tileheight="16" infinite="0" nextlayerid="2" nextobjectid="1">
 <objectgroup id="1" name="markers"/>
</map>
"#;

/// Fresh asset root under the system temp directory.
///
/// Layout:
/// ```text
/// maps/level.tmx        tile layer + image layer at 50% opacity
/// maps/markers.tmx      one object layer, no images
/// maps/isometric.tmx
/// tilesets/terrain.tsx  4 tiles, tile 0 has a 16x16 collider
/// tilesets/atlas.png    32x32
/// img/bg.png            8x4
/// ```
pub(crate) fn write_asset_root(test_name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "bevy_tmxscene_core_{}_{}",
        test_name,
        std::process::id()
    ));
    write(&root, "maps/level.tmx", LEVEL_MAP.as_bytes());
    write(&root, "maps/markers.tmx", MARKERS_MAP.as_bytes());
    write(&root, "maps/isometric.tmx", ISOMETRIC_MAP.as_bytes());
    write(&root, "tilesets/terrain.tsx", TERRAIN_TILESET.as_bytes());
    write(&root, "tilesets/atlas.png", ATLAS_PNG);
    write(&root, "img/bg.png", BACKGROUND_PNG);
    root
}

fn write(root: &Path, relative: &str, bytes: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}
