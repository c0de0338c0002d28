// THEORY:
// The `model_builder` turns the ranked groups into the geometry document: one
// thin cuboid per retained pixel, flattened group by group so that the
// element order mirrors the tint-index order. The document is a plain serde
// tree, ready to be serialized as-is.
//
// Key architectural principles:
// 1.  **Axis Flip**: Image rows grow downward while the target geometry's
//     vertical axis grows upward, so a pixel at row y spans
//     [height - y - 1, height - y] vertically. Row 0 lands at the top of the
//     model.
// 2.  **Shared Depth Slab**: Every element occupies the fixed [7.5, 8.5]
//     depth slab, a flat card centered in the unit cube rather than a full
//     cube.
//     The constants encode the target platform's coordinate convention and
//     are behavioral requirements, not tunables.
// 3.  **Redundant Faces**: All six faces of an element carry the same UV
//     rectangle, texture binding and tint index. The card is double-sided and
//     some render paths only honor certain faces, so the redundancy is what
//     makes it look right from every angle.
// 4.  **Opaque Display Pass-Through**: The display-transform configuration is
//     embedded exactly as given. The builder never validates pose names or
//     numeric ranges; that value belongs to the embedding layer.

use crate::core_modules::color_group::ColorGroup;
use crate::core_modules::pixel_buffer::Point;
use serde::Serialize;
use serde_json::Value;

/// Parent model every generated document inherits from.
pub const PARENT_MODEL: &str = "item/generated";
/// The texture slot every face references.
pub const TEXTURE_SLOT: &str = "#layer0";
/// Near edge of the shared depth slab.
pub const SLAB_FRONT: f64 = 7.5;
/// Far edge of the shared depth slab.
pub const SLAB_BACK: f64 = 8.5;

/// One face of a geometry element: a UV rectangle, the shared texture slot,
/// and the owning group's rank index as tint index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceSpec {
    pub uv: [u32; 4],
    pub texture: String,
    pub tintindex: usize,
}

/// The six named faces of a cuboid element. Every face carries an identical
/// `FaceSpec`; render paths that only honor certain faces still see the
/// right texture and tint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceSet {
    pub north: FaceSpec,
    pub east: FaceSpec,
    pub south: FaceSpec,
    pub west: FaceSpec,
    pub up: FaceSpec,
    pub down: FaceSpec,
}

/// One thin cuboid covering a single retained pixel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryElement {
    pub from: [f64; 3],
    pub to: [f64; 3],
    pub faces: FaceSet,
}

/// The single texture binding shared by all elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureBinding {
    pub layer0: String,
}

/// The complete flat pixel-art model document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDocument {
    pub parent: String,
    pub textures: TextureBinding,
    pub elements: Vec<GeometryElement>,
    pub display: Value,
}

/// Builds the model document from the ranked groups. Elements appear in
/// group order, then per-group pixel order, so tint index i always labels a
/// contiguous run of elements. Pure function; the caller gates on image
/// presence.
pub fn build_model(
    groups: &[ColorGroup],
    texture_height: u32,
    model_name: &str,
    display: &Value,
) -> ModelDocument {
    let total_pixels: usize = groups.iter().map(ColorGroup::pixel_count).sum();
    let mut elements = Vec::with_capacity(total_pixels);

    for (tint_index, group) in groups.iter().enumerate() {
        for point in &group.pixels {
            elements.push(element_for_pixel(point, texture_height, tint_index));
        }
    }

    ModelDocument {
        parent: PARENT_MODEL.to_string(),
        textures: TextureBinding {
            layer0: format!("item/{model_name}"),
        },
        elements,
        display: display.clone(),
    }
}

fn element_for_pixel(point: &Point, texture_height: u32, tint_index: usize) -> GeometryElement {
    // Image rows count down from the top; model Y counts up from the bottom.
    let bottom = f64::from(texture_height - point.y - 1);
    let top = f64::from(texture_height - point.y);

    let face = FaceSpec {
        uv: [point.x, point.y, point.x + 1, point.y + 1],
        texture: TEXTURE_SLOT.to_string(),
        tintindex: tint_index,
    };

    GeometryElement {
        from: [f64::from(point.x), bottom, SLAB_FRONT],
        to: [f64::from(point.x + 1), top, SLAB_BACK],
        faces: FaceSet {
            north: face.clone(),
            east: face.clone(),
            south: face.clone(),
            west: face.clone(),
            up: face.clone(),
            down: face,
        },
    }
}
