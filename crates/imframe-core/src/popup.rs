use crate::Vec2;
use crate::id::Id;
use crate::registry::Windows;
use crate::window::{Window, WindowKey};

/// One entry of the open-popup stack.
///
/// The popup window does not exist until the first `begin_popup` after
/// `open_popup`; until then `window` is `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupRef {
    /// Id of the label the popup was opened with, in the opener's scope.
    pub popup_id: Id,
    /// Window that was being visited when the popup was opened.
    pub parent_window: WindowKey,
    /// Id of the menu set the opener belongs to, 0 for plain popups.
    pub parent_menu_set: Id,
    pub mouse_pos_on_open: Vec2,
    pub window: Option<WindowKey>,
}

impl PopupRef {
    pub fn new(popup_id: Id, parent_window: WindowKey, parent_menu_set: Id, mouse: Vec2) -> Self {
        Self {
            popup_id,
            parent_window,
            parent_menu_set,
            mouse_pos_on_open: mouse,
            window: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.window.is_some()
    }

    /// The bound window, if it was created and has not been swept since.
    pub fn resolve<'a>(&self, windows: &'a Windows) -> Option<&'a Window> {
        self.window.and_then(|k| windows.get(k))
    }
}
