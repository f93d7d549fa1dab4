use crate::button::{ButtonPanel, ButtonTemplate};
use crate::geom::Size;

/// Named modal-panel definition: the content node's native size plus the
/// child nodes its pressable controls are parsed from. Injected by the
/// host at session construction.
#[derive(Clone, Debug)]
pub struct OverlayTemplate {
    pub name: String,
    pub content_size: Size,
    pub buttons: Vec<ButtonTemplate>,
}

/// A presentable modal panel: a backdrop stretched over the viewport and
/// content scaled uniformly to the viewport height.
#[derive(Clone, Debug)]
pub struct Overlay {
    name: String,
    native_content_size: Size,
    background_size: Size,
    content_scale: f32,
    panel: ButtonPanel,
}

impl Overlay {
    pub fn from_template(template: &OverlayTemplate) -> Overlay {
        Overlay {
            name: template.name.clone(),
            native_content_size: template.content_size,
            background_size: template.content_size,
            content_scale: 1.0,
            panel: ButtonPanel::parse(&template.buttons),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fits the overlay to the presenting view.
    pub fn update_scale(&mut self, viewport: Size) {
        self.background_size = viewport;
        self.content_scale = viewport.height / self.native_content_size.height;
    }

    pub fn background_size(&self) -> Size {
        self.background_size
    }

    pub fn content_scale(&self) -> f32 {
        self.content_scale
    }

    pub fn panel(&self) -> &ButtonPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut ButtonPanel {
        &mut self.panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::geom::Vec2;

    #[test]
    fn scales_content_to_viewport_height() {
        let template = OverlayTemplate {
            name: "pause".to_owned(),
            content_size: Size::new(800.0, 600.0),
            buttons: vec![ButtonTemplate {
                name: "resume".to_owned(),
                position: Vec2::ZERO,
                size: Size::new(120.0, 48.0),
                texture: None,
            }],
        };

        let mut overlay = Overlay::from_template(&template);
        assert_eq!(overlay.content_scale(), 1.0);

        overlay.update_scale(Size::new(1920.0, 1200.0));
        assert_eq!(overlay.background_size(), Size::new(1920.0, 1200.0));
        assert_eq!(overlay.content_scale(), 2.0);
        assert_eq!(overlay.panel().buttons().len(), 1);
    }
}
