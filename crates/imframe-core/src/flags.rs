use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const NO_TITLE_BAR        = 1 << 0;
        const NO_RESIZE           = 1 << 1;
        const NO_MOVE             = 1 << 2;
        const NO_SCROLLBAR        = 1 << 3;
        const NO_COLLAPSE         = 1 << 4;
        const ALWAYS_AUTO_RESIZE  = 1 << 5;
        const NO_SAVED_SETTINGS   = 1 << 6;
        const MENU_BAR            = 1 << 7;
        const CHILD_WINDOW        = 1 << 20;
        const COMBO_BOX           = 1 << 21;
        const TOOLTIP             = 1 << 22;
        const POPUP               = 1 << 23;
        const MODAL               = 1 << 24;
        const CHILD_MENU          = 1 << 25;
    }
}

bitflags! {
    /// Gate for `set_pos` / `set_size` / `set_collapsed`. The empty set means
    /// "always".
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SetCond: u8 {
        const ALWAYS         = 1 << 0;
        /// Honored once per runtime session.
        const ONCE           = 1 << 1;
        /// Honored only when the window has no persisted settings.
        const FIRST_USE_EVER = 1 << 2;
        /// Honored when the window reappears after being hidden.
        const APPEARING      = 1 << 3;
    }
}

impl SetCond {
    /// Bits cleared from an allow mask by any attempted call.
    pub const ONE_SHOT: SetCond = SetCond::ONCE
        .union(SetCond::FIRST_USE_EVER)
        .union(SetCond::APPEARING);

    /// Initial allow mask of a freshly created window.
    pub const ALLOW_ALL: SetCond = SetCond::ALWAYS.union(SetCond::ONE_SHOT);

    /// Unknown bits are dropped; a value with no known bit behaves as `ALWAYS`.
    pub fn from_raw(raw: u8) -> SetCond {
        let cond = SetCond::from_bits_truncate(raw);
        if cond.is_empty() {
            if raw != 0 {
                log::warn!("SetCond::from_raw: no known bits in {raw:#04x}; treating as ALWAYS");
            }
            SetCond::ALWAYS
        } else {
            cond
        }
    }

    /// Whether a call made with `self` passes `allow`.
    pub fn passes(self, allow: SetCond) -> bool {
        self.is_empty() || allow.intersects(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        assert_eq!(SetCond::from_raw(0), SetCond::ALWAYS);
        assert_eq!(SetCond::from_raw(0xF0), SetCond::ALWAYS);
        assert_eq!(SetCond::from_raw(0x12), SetCond::ONCE);
    }

    #[test]
    fn test_passes() {
        let allow = SetCond::ALWAYS | SetCond::APPEARING;
        assert!(SetCond::empty().passes(SetCond::empty()));
        assert!(SetCond::ALWAYS.passes(allow));
        assert!(SetCond::APPEARING.passes(allow));
        assert!(!SetCond::ONCE.passes(allow));
    }
}
