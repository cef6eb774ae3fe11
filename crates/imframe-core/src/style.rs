//! # Style and configuration
//!
//! `Style` holds the metrics and colours every window reads while laying out
//! widgets. It is deliberately small: padding and spacing, the minimum window
//! size, the base font size and a colour table indexed by [`Col`].
//!
//! Temporary overrides go through the colour and style-var stacks on the
//! frame driver, which record a [`ColMod`](crate::stacks::ColMod) or
//! [`StyleMod`](crate::stacks::StyleMod) so the previous value comes back on
//! pop.
//!
//! `Config` wraps a `Style` with the knobs of the frame driver itself.

use crate::{Color, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Col {
    Text,
    TextDisabled,
    WindowBg,
    ChildWindowBg,
    PopupBg,
    Border,
    FrameBg,
    TitleBg,
    TitleBgActive,
    TitleBgCollapsed,
    MenuBarBg,
    ScrollbarBg,
    Button,
    ButtonHovered,
    ButtonActive,
    TextSelectedBg,
}

impl Col {
    pub const COUNT: usize = Col::TextSelectedBg as usize + 1;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleVar {
    Alpha,
    WindowPadding,
    WindowRounding,
    WindowMinSize,
    FramePadding,
    ItemSpacing,
    ItemInnerSpacing,
    IndentSpacing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleValue {
    Float(f32),
    Vec2(Vec2),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub alpha: f32,
    pub window_padding: Vec2,
    pub window_min_size: Vec2,
    pub window_rounding: f32,
    pub frame_padding: Vec2,
    pub item_spacing: Vec2,
    pub item_inner_spacing: Vec2,
    pub indent_spacing: f32,
    pub scrollbar_size: f32,
    /// Font size in pixels before per-window scaling.
    pub font_size: f32,
    pub colors: [Color; Col::COUNT],
}

impl Default for Style {
    fn default() -> Self {
        let mut colors = [Color::TRANSPARENT; Col::COUNT];
        colors[Col::Text as usize] = Color::from_hex("#E6E6E6");
        colors[Col::TextDisabled as usize] = Color::from_hex("#999999");
        colors[Col::WindowBg as usize] = Color::from_hex("#000000B3");
        colors[Col::PopupBg as usize] = Color::from_hex("#0D0D1AE6");
        colors[Col::Border as usize] = Color::from_hex("#B3B3B365");
        colors[Col::FrameBg as usize] = Color::from_hex("#CCCCCC4C");
        colors[Col::TitleBg as usize] = Color::from_hex("#6666CCD1");
        colors[Col::TitleBgActive as usize] = Color::from_hex("#8080E6DE");
        colors[Col::TitleBgCollapsed as usize] = Color::from_hex("#6666CC33");
        colors[Col::MenuBarBg as usize] = Color::from_hex("#666680CC");
        colors[Col::ScrollbarBg as usize] = Color::from_hex("#33406699");
        colors[Col::Button as usize] = Color::from_hex("#66669999");
        colors[Col::ButtonHovered as usize] = Color::from_hex("#6666B3FF");
        colors[Col::ButtonActive as usize] = Color::from_hex("#8080CCFF");
        colors[Col::TextSelectedBg as usize] = Color::from_hex("#0000FF73");
        Self {
            alpha: 1.0,
            window_padding: Vec2::new(8.0, 8.0),
            window_min_size: Vec2::new(32.0, 32.0),
            window_rounding: 9.0,
            frame_padding: Vec2::new(4.0, 3.0),
            item_spacing: Vec2::new(8.0, 4.0),
            item_inner_spacing: Vec2::new(4.0, 4.0),
            indent_spacing: 22.0,
            scrollbar_size: 16.0,
            font_size: 13.0,
            colors,
        }
    }
}

impl Style {
    pub fn color(&self, col: Col) -> Color {
        self.colors[col as usize]
    }

    pub fn set_color(&mut self, col: Col, c: Color) {
        self.colors[col as usize] = c;
    }

    pub fn var(&self, var: StyleVar) -> StyleValue {
        match var {
            StyleVar::Alpha => StyleValue::Float(self.alpha),
            StyleVar::WindowRounding => StyleValue::Float(self.window_rounding),
            StyleVar::IndentSpacing => StyleValue::Float(self.indent_spacing),
            StyleVar::WindowPadding => StyleValue::Vec2(self.window_padding),
            StyleVar::WindowMinSize => StyleValue::Vec2(self.window_min_size),
            StyleVar::FramePadding => StyleValue::Vec2(self.frame_padding),
            StyleVar::ItemSpacing => StyleValue::Vec2(self.item_spacing),
            StyleVar::ItemInnerSpacing => StyleValue::Vec2(self.item_inner_spacing),
        }
    }

    /// Writes `value` into `var`. Panics when the value kind does not match
    /// the variable (a float into a vector slot or the reverse).
    pub fn set_var(&mut self, var: StyleVar, value: StyleValue) {
        match (var, value) {
            (StyleVar::Alpha, StyleValue::Float(v)) => self.alpha = v,
            (StyleVar::WindowRounding, StyleValue::Float(v)) => self.window_rounding = v,
            (StyleVar::IndentSpacing, StyleValue::Float(v)) => self.indent_spacing = v,
            (StyleVar::WindowPadding, StyleValue::Vec2(v)) => self.window_padding = v,
            (StyleVar::WindowMinSize, StyleValue::Vec2(v)) => self.window_min_size = v,
            (StyleVar::FramePadding, StyleValue::Vec2(v)) => self.frame_padding = v,
            (StyleVar::ItemSpacing, StyleValue::Vec2(v)) => self.item_spacing = v,
            (StyleVar::ItemInnerSpacing, StyleValue::Vec2(v)) => self.item_inner_spacing = v,
            (var, value) => panic!("Style::set_var: {value:?} does not fit {var:?}"),
        }
    }
}

/// Frame driver configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub style: Style,
    /// Frames a window may go unvisited before the sweep reclaims it.
    pub gc_inactive_frames: u32,
    /// Where windows without persisted settings first appear.
    pub default_window_pos: Vec2,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: Style::default(),
            gc_inactive_frames: 600,
            default_window_pos: Vec2::new(60.0, 60.0),
        }
    }
}
