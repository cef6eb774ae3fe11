#[cfg(test)]
mod tests {
    use imframe_core::id::hash_str;
    use imframe_core::*;

    use crate::Context;

    fn frame(ctx: &mut Context, f: impl FnOnce(&mut Context)) {
        ctx.new_frame();
        f(ctx);
        ctx.end_frame();
    }

    fn main_window(ctx: &mut Context, f: impl FnOnce(&mut Context)) {
        frame(ctx, |ctx| {
            ctx.begin("Main", WindowFlags::empty());
            f(ctx);
            ctx.end();
        });
    }

    #[test]
    fn test_frames_count_from_one() {
        let mut ctx = Context::default();
        assert_eq!(ctx.frame_count(), 0);
        main_window(&mut ctx, |_| {});
        assert_eq!(ctx.frame_count(), 1);
        let key = ctx.windows.find_by_name("Main").unwrap();
        assert_eq!(ctx.windows[key].last_frame_active, 1);
    }

    #[test]
    fn test_new_window_auto_fits_its_contents() {
        let mut ctx = Context::default();
        for _ in 0..3 {
            main_window(&mut ctx, |ctx| ctx.item_size(Vec2::new(100.0, 40.0)));
        }
        let key = ctx.windows.find_by_name("Main").unwrap();
        let w = &ctx.windows[key];
        assert_eq!(w.auto_fit_frames, [0, 0]);
        // 8 padding + 100 wide; title bar 19 + 8 padding + 40 + 4 spacing + 8
        assert_eq!(w.size_full, Vec2::new(116.0, 79.0));
    }

    #[test]
    fn test_begin_order_sorts_children_by_kind() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| {
            let kinds = [
                ("Main/normal", WindowFlags::empty()),
                ("Main/combo", WindowFlags::COMBO_BOX),
                ("Main/tooltip", WindowFlags::TOOLTIP),
                ("Main/popup", WindowFlags::POPUP),
            ];
            for (name, flags) in kinds {
                if flags.contains(WindowFlags::POPUP) {
                    ctx.open_popup("popup");
                }
                ctx.begin(name, flags | WindowFlags::CHILD_WINDOW);
                ctx.end();
            }
        });

        let names: Vec<&str> = ctx
            .sorted_windows()
            .into_iter()
            .map(|k| ctx.windows[k].name.as_str())
            .collect();
        insta::assert_snapshot!(
            names.join(" > "),
            @"Main > Main/popup > Main/tooltip > Main/combo > Main/normal"
        );
    }

    #[test]
    fn test_popup_hidden_first_frame_then_shown_then_closed() {
        let mut ctx = Context::default();
        ctx.mouse_pos = Vec2::new(30.0, 40.0);

        main_window(&mut ctx, |ctx| {
            ctx.open_popup("menu");
            assert!(ctx.is_popup_open("menu"));
            assert!(ctx.begin_popup("menu"));
            ctx.item_size(Vec2::new(40.0, 10.0));
            ctx.end_popup();
        });
        let main = ctx.windows.find_by_name("Main").unwrap();
        assert_eq!(ctx.render_list(), vec![ctx.windows[main].id]);
        let popup = ctx.focused_window().unwrap();
        assert!(ctx.windows[popup].is_popup());
        assert_eq!(ctx.windows[popup].pos, Vec2::new(30.0, 40.0));
        assert_eq!(ctx.windows[popup].parent_window, Some(main));

        main_window(&mut ctx, |ctx| {
            assert!(ctx.begin_popup("menu"));
            ctx.end_popup();
            assert!(!ctx.is_window_content_hoverable(main));
            assert!(ctx.is_window_content_hoverable(popup));
        });
        assert_eq!(
            ctx.render_list(),
            vec![ctx.windows[main].id, ctx.windows[popup].id]
        );

        main_window(&mut ctx, |ctx| {
            assert!(ctx.begin_popup("menu"));
            ctx.close_current_popup();
            ctx.end_popup();
        });
        assert_eq!(ctx.open_popup_count(), 0);
        assert_eq!(ctx.focused_window(), Some(main));

        main_window(&mut ctx, |ctx| assert!(!ctx.begin_popup("menu")));
        assert_eq!(ctx.render_list(), vec![ctx.windows[main].id]);
    }

    #[test]
    fn test_opening_a_sibling_replaces_the_open_popup() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| {
            ctx.open_popup("a");
            ctx.open_popup("a");
            assert_eq!(ctx.open_popup_count(), 1);
            ctx.open_popup("b");
            assert_eq!(ctx.open_popup_count(), 1);
            assert!(ctx.is_popup_open("b"));
            assert!(!ctx.is_popup_open("a"));
        });
    }

    #[test]
    fn test_close_without_popup_is_ignored() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| ctx.close_current_popup());
        assert_eq!(ctx.open_popup_count(), 0);
    }

    #[test]
    fn test_style_stacks_restore() {
        let mut ctx = Context::default();
        let defaults = Style::default();
        main_window(&mut ctx, |ctx| {
            ctx.push_style_color(Col::Text, Color::from_rgb(255, 0, 0));
            ctx.push_style_var(StyleVar::ItemSpacing, StyleValue::Vec2(Vec2::new(2.0, 2.0)));
            ctx.push_style_var(StyleVar::Alpha, StyleValue::Float(0.5));
            assert_eq!(ctx.config.style.item_spacing, Vec2::new(2.0, 2.0));
            assert_eq!(ctx.config.style.color(Col::Text), Color::from_rgb(255, 0, 0));
            ctx.pop_style_var(2);
            ctx.pop_style_color(1);
        });
        assert_eq!(ctx.config.style, defaults);
    }

    #[test]
    #[should_panic(expected = "style color stack")]
    fn test_unbalanced_push_panics_at_end() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| {
            ctx.push_style_color(Col::Text, Color::WHITE);
        });
    }

    #[test]
    #[should_panic(expected = "more pops than pushes")]
    fn test_extra_pop_panics() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| ctx.pop_style_var(1));
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_mismatched_style_value_panics() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| {
            ctx.push_style_var(StyleVar::Alpha, StyleValue::Vec2(Vec2::ZERO));
        });
    }

    #[test]
    fn test_active_id_cleared_when_not_kept_alive() {
        let mut ctx = Context::default();
        let mut id = 0;
        main_window(&mut ctx, |ctx| {
            id = ctx.get_id("Button");
            ctx.set_active_id(id);
        });
        assert_eq!(ctx.active_id(), id);

        main_window(&mut ctx, |ctx| {
            ctx.get_id("Button");
        });
        assert_eq!(ctx.active_id(), id);

        main_window(&mut ctx, |_| {});
        assert_eq!(ctx.active_id(), 0);
        assert_eq!(ctx.active_id_previous_frame(), id);
    }

    #[test]
    fn test_group_takes_over_active_item() {
        let mut ctx = Context::default();
        let mut id = 0;
        main_window(&mut ctx, |ctx| {
            id = ctx.get_id("field");
            ctx.set_active_id(id);
        });
        main_window(&mut ctx, |ctx| {
            ctx.begin_group();
            ctx.get_id("field");
            ctx.item_size(Vec2::new(50.0, 10.0));
            ctx.item_size(Vec2::new(30.0, 10.0));
            let bb = ctx.end_group();
            assert_eq!(bb.width(), 50.0);
            assert_eq!(bb.height(), 28.0);
            assert_eq!(ctx.current_window().unwrap().dc.last_item_id, id);
        });
    }

    #[test]
    fn test_pushed_id_scopes_lookups() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| {
            let plain = ctx.get_id("Delete");
            ctx.push_id_int(3);
            let row = ctx.get_id("Delete");
            ctx.pop_id();
            assert_ne!(plain, row);
            assert_eq!(plain, ctx.get_id("Delete"));
        });
    }

    #[test]
    #[should_panic(expected = "id stack")]
    fn test_unpopped_id_panics_at_end() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| {
            ctx.push_id("row");
        });
    }

    #[test]
    fn test_text_edit_focus_reuses_state_for_same_id() {
        let mut ctx: Context = Context::default();
        let st = ctx.focus_text_edit(7, "abc", 16);
        assert!(st.insert_chars(3, &['d']));
        assert_eq!(ctx.focus_text_edit(7, "zzz", 16).text(), "abcd");
        assert_eq!(ctx.focus_text_edit(8, "zzz", 16).text(), "zzz");
        ctx.release_text_edit();
        assert!(ctx.text_edit().is_none());
    }

    #[test]
    fn test_sweep_saves_and_restores_settings() {
        let mut config = Config::default();
        config.gc_inactive_frames = 2;
        let mut ctx = Context::new(config, MemorySettings::new());

        frame(&mut ctx, |ctx| {
            ctx.set_next_window_pos(Vec2::new(10.0, 20.0), SetCond::ALWAYS);
            ctx.set_next_window_size(Vec2::new(200.0, 100.0), SetCond::ALWAYS);
            ctx.begin("Tools", WindowFlags::empty());
            ctx.end();
        });
        frame(&mut ctx, |_| {});
        frame(&mut ctx, |_| {});
        assert!(ctx.sweep_inactive_windows().is_empty());
        frame(&mut ctx, |_| {});
        assert_eq!(ctx.sweep_inactive_windows(), vec!["Tools".to_string()]);
        assert!(ctx.windows.is_empty());

        let saved = ctx.settings().load(hash_str("Tools", None, 0)).unwrap();
        assert_eq!(saved.pos, Vec2::new(10.0, 20.0));
        assert_eq!(saved.size, Vec2::new(200.0, 100.0));

        frame(&mut ctx, |ctx| {
            ctx.begin("Tools", WindowFlags::empty());
            ctx.end();
        });
        let key = ctx.windows.find_by_name("Tools").unwrap();
        assert_eq!(ctx.windows[key].pos, Vec2::new(10.0, 20.0));
        assert_eq!(ctx.windows[key].size_full, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_no_saved_settings_windows_are_not_saved() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |_| {});
        frame(&mut ctx, |ctx| {
            ctx.begin("Scratch", WindowFlags::NO_SAVED_SETTINGS);
            ctx.end();
        });
        ctx.save_settings();
        assert_eq!(ctx.settings().len(), 1);
        assert!(ctx.settings().iter().all(|s| s.name == "Main"));
    }

    #[test]
    #[should_panic(expected = "was not consumed")]
    fn test_unconsumed_size_constraint_panics() {
        let mut ctx = Context::default();
        frame(&mut ctx, |ctx| {
            ctx.set_next_window_size_constraint(Vec2::ZERO, Vec2::splat(100.0));
        });
    }

    #[test]
    fn test_size_constraint_clamps_requested_size() {
        let mut ctx = Context::default();
        frame(&mut ctx, |ctx| {
            ctx.set_next_window_size(Vec2::new(500.0, 50.0), SetCond::ALWAYS);
            ctx.set_next_window_size_constraint(Vec2::splat(100.0), Vec2::splat(300.0));
            ctx.begin("Main", WindowFlags::empty());
            ctx.end();
        });
        let key = ctx.windows.find_by_name("Main").unwrap();
        assert_eq!(ctx.windows[key].size_full, Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_min_size_applies_to_windows_not_children() {
        let mut ctx = Context::default();
        frame(&mut ctx, |ctx| {
            ctx.set_next_window_size(Vec2::new(5.0, 5.0), SetCond::ALWAYS);
            ctx.begin("Main", WindowFlags::empty());
            ctx.begin_child("list", Vec2::new(5.0, 5.0), WindowFlags::empty());
            ctx.end_child();
            ctx.end();
        });
        let main = ctx.windows.find_by_name("Main").unwrap();
        let child = ctx.windows.find_by_name("Main.list").unwrap();
        assert_eq!(ctx.windows[main].size_full, Vec2::new(32.0, 32.0));
        assert_eq!(ctx.windows[child].size_full, Vec2::new(5.0, 5.0));
        assert_eq!(ctx.windows[child].root_window, main);
    }

    #[test]
    fn test_column_offsets_persist_across_frames() {
        let mut ctx = Context::default();
        frame(&mut ctx, |ctx| {
            ctx.set_next_window_size(Vec2::new(220.0, 200.0), SetCond::ALWAYS);
            ctx.begin("Main", WindowFlags::empty());
            ctx.columns(2, None, false);
            let dc = &ctx.current_window().unwrap().dc;
            // columns span 8..212 inside the window
            assert_eq!(dc.column_offset(1), 110.0);
            ctx.next_column();
            assert_eq!(ctx.column_index(), 1);
            ctx.next_column();
            assert_eq!(ctx.column_index(), 0);
            ctx.set_column_offset(1, 59.0);
            assert_eq!(ctx.current_window().unwrap().dc.column_offset(1), 59.0);
            ctx.columns(1, None, false);
            ctx.end();
        });
        frame(&mut ctx, |ctx| {
            ctx.begin("Main", WindowFlags::empty());
            ctx.columns(2, None, false);
            assert_eq!(ctx.current_window().unwrap().dc.column_offset(1), 59.0);
            ctx.columns(1, None, false);
            ctx.end();
        });
    }

    #[test]
    #[should_panic(expected = "still open")]
    fn test_open_columns_panic_at_end() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| ctx.columns(3, Some("grid"), true));
    }

    #[test]
    fn test_same_line_uses_style_spacing() {
        let mut ctx = Context::default();
        main_window(&mut ctx, |ctx| {
            let start = ctx.cursor_pos();
            ctx.item_size(Vec2::new(40.0, 10.0));
            ctx.same_line(0.0, -1.0);
            assert_eq!(ctx.cursor_pos(), Vec2::new(start.x + 48.0, start.y));
        });
    }

    #[test]
    fn test_next_window_request_applies_to_appending_begin() {
        let mut ctx = Context::default();
        frame(&mut ctx, |ctx| {
            ctx.begin("Main", WindowFlags::empty());
            ctx.end();
            ctx.set_next_window_pos(Vec2::new(500.0, 500.0), SetCond::ALWAYS);
            ctx.set_next_window_size_constraint(Vec2::splat(-1.0), Vec2::splat(-1.0));
            ctx.begin("Main", WindowFlags::empty());
            ctx.end();
            ctx.begin("Other", WindowFlags::empty());
            ctx.end();
        });
        let main = ctx.windows.find_by_name("Main").unwrap();
        let other = ctx.windows.find_by_name("Other").unwrap();
        assert_eq!(ctx.windows[main].pos, Vec2::new(500.0, 500.0));
        assert_eq!(ctx.windows[other].pos, Vec2::new(60.0, 60.0));
    }

    #[test]
    fn test_tooltip_follows_mouse_every_frame() {
        let mut ctx = Context::default();
        for x in [100.0, 300.0] {
            ctx.mouse_pos = Vec2::new(x, 80.0);
            main_window(&mut ctx, |ctx| {
                ctx.begin_tooltip();
                ctx.item_size(Vec2::new(50.0, 13.0));
                ctx.end_tooltip();
            });
            let tip = ctx.windows.find_by_name("##Tooltip").unwrap();
            assert_eq!(ctx.windows[tip].pos, Vec2::new(x + 16.0, 88.0));
        }
    }

    #[test]
    #[should_panic(expected = "missing end()")]
    fn test_end_frame_with_open_window_panics() {
        let mut ctx = Context::default();
        frame(&mut ctx, |ctx| {
            ctx.begin("Main", WindowFlags::empty());
        });
    }
}
