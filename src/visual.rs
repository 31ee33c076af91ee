use crate::bounds::*;
use crate::compiler::StructureSite;
use crate::location::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "screeps")]
use screeps::*;

/// Persisted description of where the core was placed, for drawing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreVisual {
    #[serde(with = "crate::location::xy_serde")]
    pub core_center: Location,
    pub core_bounds: BoundingBox,
}

pub trait RoomVisualizer {
    /// Outline the tile rectangle `bounds`.
    fn outline(&mut self, bounds: &BoundingBox);

    fn label(&mut self, location: Location, text: &str);

    fn render_site(&mut self, site: &StructureSite);
}

/// Draw the core outline and mark its centre.
pub fn visualize<V: RoomVisualizer + ?Sized>(visualizer: &mut V, visual: &CoreVisual) {
    visualizer.outline(&visual.core_bounds);
    visualizer.label(visual.core_center, "core");
}

pub fn visualize_sites<V: RoomVisualizer + ?Sized>(visualizer: &mut V, sites: &[StructureSite]) {
    for site in sites {
        visualizer.render_site(site);
    }
}

#[cfg(feature = "screeps")]
fn site_color(structure_type: StructureType) -> &'static str {
    match structure_type {
        StructureType::Spawn | StructureType::Extension => "#ffe56d",
        StructureType::Tower | StructureType::Rampart | StructureType::Wall => "#ff6d6d",
        StructureType::Road => "#a0a0a0",
        StructureType::Lab | StructureType::Terminal | StructureType::Factory => "#b06dff",
        StructureType::Container | StructureType::Link | StructureType::Storage => "#6dbdff",
        _ => "#ffffff",
    }
}

#[cfg(feature = "screeps")]
impl RoomVisualizer for RoomVisual {
    fn outline(&mut self, bounds: &BoundingBox) {
        let style = RectStyle::default()
            .fill("transparent")
            .stroke("#6dff8b")
            .stroke_width(0.1)
            .opacity(0.6);

        self.rect(
            bounds.min_x as f32 - 0.5,
            bounds.min_y as f32 - 0.5,
            bounds.width() as f32,
            bounds.height() as f32,
            Some(style),
        );
    }

    fn label(&mut self, location: Location, text: &str) {
        let style = TextStyle::default().color("#6dff8b").opacity(0.8);
        self.text(
            location.x() as f32,
            location.y() as f32,
            text.to_owned(),
            Some(style),
        );
    }

    fn render_site(&mut self, site: &StructureSite) {
        let style = RectStyle::default()
            .fill(site_color(site.structure_type))
            .opacity(0.3);

        self.rect(
            site.pos.x() as f32 - 0.4,
            site.pos.y() as f32 - 0.4,
            0.8,
            0.8,
            Some(style),
        );
    }
}
