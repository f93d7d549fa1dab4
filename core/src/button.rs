use crate::geom::{Rect, Size, Vec2};
use crate::input::ControlDirection;

/// Receives press events from a [`ButtonPanel`].
pub trait ButtonResponder {
    fn button_pressed(&mut self, button: ButtonIdentifier);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonIdentifier {
    Resume,
    Cancel,
    Replay,
    Pause,
}

impl ButtonIdentifier {
    pub const ALL: [ButtonIdentifier; 4] = [
        ButtonIdentifier::Resume,
        ButtonIdentifier::Cancel,
        ButtonIdentifier::Replay,
        ButtonIdentifier::Pause,
    ];

    /// Node name the button is parsed out of a template by.
    pub fn name(self) -> &'static str {
        match self {
            ButtonIdentifier::Resume => "resume",
            ButtonIdentifier::Cancel => "cancel",
            ButtonIdentifier::Replay => "replay",
            ButtonIdentifier::Pause => "pause",
        }
    }

    pub fn from_name(name: &str) -> Option<ButtonIdentifier> {
        ButtonIdentifier::ALL
            .into_iter()
            .find(|identifier| identifier.name() == name)
    }

    /// Only the focus-navigable menu buttons ship dedicated focused art.
    pub fn focused_texture_name(self) -> Option<&'static str> {
        match self {
            ButtonIdentifier::Replay => Some("button_green_focussed"),
            ButtonIdentifier::Cancel => Some("button_red_focussed"),
            _ => None,
        }
    }
}

/// Stand-in for a scene-graph node a button is built from; the host parses
/// these out of its overlay/scene definitions and injects them.
#[derive(Clone, Debug)]
pub struct ButtonTemplate {
    pub name: String,
    pub position: Vec2,
    pub size: Size,
    pub texture: Option<String>,
}

/// A pressable control with independent highlighted/selected/focused
/// visual states. Highlight is a tint over the current texture; selected
/// and focused swap the texture itself.
#[derive(Clone, Debug)]
pub struct Button {
    identifier: ButtonIdentifier,
    frame: Rect,
    default_texture: Option<String>,
    selected_texture: Option<String>,
    focused_texture: Option<String>,
    highlighted: bool,
    selected: bool,
    focused: bool,
    focus_neighbors: [Option<ButtonIdentifier>; 4],
}

impl Button {
    /// Panics when the template's name is not a known button identifier;
    /// that means a mislabeled node, not bad runtime data.
    pub fn from_template(template: &ButtonTemplate) -> Button {
        let identifier = ButtonIdentifier::from_name(&template.name)
            .unwrap_or_else(|| panic!("unsupported button name: {:?}", template.name));

        Button {
            identifier,
            frame: Rect::new(template.position, template.size),
            default_texture: template.texture.clone(),
            selected_texture: None,
            focused_texture: identifier.focused_texture_name().map(str::to_owned),
            highlighted: false,
            selected: false,
            focused: false,
            focus_neighbors: [None; 4],
        }
    }

    pub fn identifier(&self) -> ButtonIdentifier {
        self.identifier
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Hit region; the frame covers the button's descendants as well.
    pub fn contains(&self, point: Vec2) -> bool {
        self.frame.contains(point)
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Focused beats selected beats the default texture; missing overrides
    /// fall through to the default.
    pub fn current_texture(&self) -> Option<&str> {
        if self.focused {
            if let Some(texture) = &self.focused_texture {
                return Some(texture);
            }
        }
        if self.selected {
            if let Some(texture) = &self.selected_texture {
                return Some(texture);
            }
        }
        self.default_texture.as_deref()
    }

    pub fn color_blend_factor(&self) -> f32 {
        if self.highlighted {
            1.0
        } else {
            0.0
        }
    }

    pub fn scale(&self) -> f32 {
        if self.focused {
            1.08
        } else {
            1.0
        }
    }

    /// Focused buttons render their label dark against the focused art.
    pub fn label_dark(&self) -> bool {
        self.focused
    }

    pub fn set_focus_neighbor(&mut self, direction: ControlDirection, neighbor: ButtonIdentifier) {
        self.focus_neighbors[direction as usize] = Some(neighbor);
    }

    pub fn focus_neighbor(&self, direction: ControlDirection) -> Option<ButtonIdentifier> {
        self.focus_neighbors[direction as usize]
    }
}

/// A group of buttons sharing a surface (a HUD or an overlay's content).
/// Tracks one in-flight press at a time and owns focus bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct ButtonPanel {
    buttons: Vec<Button>,
    pressed: Option<usize>,
}

impl ButtonPanel {
    /// Picks the templates named after known identifiers out of a node
    /// list; anything else in the template is not a button and stays put.
    pub fn parse(templates: &[ButtonTemplate]) -> ButtonPanel {
        let mut buttons = Vec::new();
        for identifier in ButtonIdentifier::ALL {
            let Some(template) = templates.iter().find(|t| t.name == identifier.name()) else {
                continue;
            };
            buttons.push(Button::from_template(template));
        }
        ButtonPanel {
            buttons,
            pressed: None,
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button(&self, identifier: ButtonIdentifier) -> Option<&Button> {
        self.buttons.iter().find(|b| b.identifier() == identifier)
    }

    pub fn button_mut(&mut self, identifier: ButtonIdentifier) -> Option<&mut Button> {
        self.buttons.iter_mut().find(|b| b.identifier() == identifier)
    }

    pub fn pointer_began(&mut self, position: Vec2) {
        self.pressed = self.buttons.iter().position(|b| b.contains(position));
        if let Some(index) = self.pressed {
            self.buttons[index].set_highlighted(true);
        }
    }

    /// Ends the in-flight press. The highlight always clears; the responder
    /// only hears about it when the release lands back inside the button.
    pub fn pointer_ended(&mut self, position: Vec2, responder: &mut dyn ButtonResponder) {
        let Some(index) = self.pressed.take() else {
            return;
        };
        let button = &mut self.buttons[index];
        button.set_highlighted(false);
        if button.contains(position) {
            responder.button_pressed(button.identifier());
        }
    }

    pub fn pointer_cancelled(&mut self) {
        if let Some(index) = self.pressed.take() {
            self.buttons[index].set_highlighted(false);
        }
    }

    /// Moves focus to the first button, for platforms that navigate by
    /// direction instead of pointer.
    pub fn reset_focus(&mut self) {
        for (index, button) in self.buttons.iter_mut().enumerate() {
            button.set_focused(index == 0);
        }
    }

    pub fn focused(&self) -> Option<ButtonIdentifier> {
        self.buttons
            .iter()
            .find(|b| b.is_focused())
            .map(|b| b.identifier())
    }

    /// Follows the focused button's registered neighbor; returns false when
    /// nothing is focused or no neighbor is registered that way.
    pub fn move_focus(&mut self, direction: ControlDirection) -> bool {
        let Some(current) = self.focused() else {
            return false;
        };
        let next = self
            .button(current)
            .and_then(|button| button.focus_neighbor(direction));
        let Some(next) = next else {
            return false;
        };
        for button in &mut self.buttons {
            let focused = button.identifier() == next;
            button.set_focused(focused);
        }
        true
    }

    pub fn trigger_focused(&mut self, responder: &mut dyn ButtonResponder) {
        if let Some(identifier) = self.focused() {
            responder.button_pressed(identifier);
        }
    }

    pub fn set_focus_neighbor(
        &mut self,
        from: ButtonIdentifier,
        direction: ControlDirection,
        to: ButtonIdentifier,
    ) {
        if let Some(button) = self.button_mut(from) {
            button.set_focus_neighbor(direction, to);
        }
    }
}
