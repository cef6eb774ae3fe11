//! Drives a few frames without a renderer and logs what would be painted.
//!
//! `RUST_LOG=debug cargo run -p headless [font.ttf]`

use anyhow::Context as _;
use imframe_core::{SetCond, Vec2, WindowFlags};
use imframe_text::{AbGlyphMetrics, EditKey, FixedAdvance, GlyphMetrics, LineBreaker};
use imframe_ui::Context;

const FONT_SIZE: f32 = 13.0;

fn ui<M: GlyphMetrics>(ctx: &mut Context, layout: &LineBreaker<M>, frame: i64) {
    ctx.set_next_window_pos(Vec2::new(40.0, 40.0), SetCond::FIRST_USE_EVER);
    ctx.set_next_window_size(Vec2::new(320.0, 240.0), SetCond::FIRST_USE_EVER);
    if ctx.begin("Inspector", WindowFlags::empty()) {
        ctx.item_size(Vec2::new(120.0, FONT_SIZE));
        ctx.same_line(0.0, -1.0);
        ctx.item_size(Vec2::new(60.0, FONT_SIZE));

        ctx.columns(2, None, true);
        for row in 0..3 {
            ctx.push_id_int(row);
            let id = ctx.get_id("value");
            ctx.item_size(Vec2::new(40.0, FONT_SIZE));
            ctx.next_column();
            if row == 1 && frame == 1 {
                ctx.set_active_id(id);
                let st = ctx.focus_text_edit(id, "width = 12", 64);
                st.click(layout, 1000.0, 4.0);
                st.on_key_pressed(layout, EditKey::Backspace, false);
                st.on_key_pressed(layout, EditKey::Char('6'), false);
            }
            ctx.item_size(Vec2::new(80.0, FONT_SIZE));
            ctx.next_column();
            ctx.pop_id();
        }
        ctx.columns(1, None, false);

        if ctx.begin_child("log", Vec2::new(0.0, 60.0), WindowFlags::empty()) {
            ctx.item_size(Vec2::new(200.0, FONT_SIZE));
        }
        ctx.end_child();

        if frame == 2 {
            ctx.open_popup("actions");
        }
        if ctx.begin_popup("actions") {
            ctx.item_size(Vec2::new(90.0, FONT_SIZE));
            if frame == 4 {
                ctx.close_current_popup();
            }
            ctx.end_popup();
        }

        if frame % 2 == 1 {
            if ctx.begin_tooltip() {
                ctx.item_size(Vec2::new(100.0, FONT_SIZE));
            }
            ctx.end_tooltip();
        }
    }
    ctx.end();
}

fn run<M: GlyphMetrics>(layout: LineBreaker<M>) {
    let mut ctx = Context::default();
    for frame in 1..=5 {
        ctx.mouse_pos = Vec2::new(100.0 + frame as f32, 80.0);
        ctx.new_frame();
        ui(&mut ctx, &layout, frame);
        ctx.end_frame();

        let painted: Vec<&str> = ctx
            .render_list()
            .into_iter()
            .filter_map(|id| ctx.windows.find_by_id(id))
            .map(|k| ctx.windows[k].name.as_str())
            .collect();
        log::info!("frame {frame}: paint {painted:?}");
        if let Some(st) = ctx.text_edit() {
            log::info!("frame {frame}: editing {:?}, cursor {}", st.text(), st.cursor());
        }
    }
    ctx.save_settings();
    for s in ctx.settings().iter() {
        log::info!("saved {:?} at {:?} size {:?}", s.name, s.pos, s.size);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    match std::env::args().nth(1) {
        Some(path) => {
            let bytes = std::fs::read(&path).with_context(|| format!("reading font {path}"))?;
            let metrics = AbGlyphMetrics::from_bytes(bytes, FONT_SIZE)?;
            run(LineBreaker::new(metrics, FONT_SIZE));
        }
        None => run(LineBreaker::new(FixedAdvance::new(7.0, FONT_SIZE), FONT_SIZE)),
    }
    Ok(())
}
