//! Frame composition for the desktop.

use chrono::NaiveTime;
use xlos_core::logging::span_names;
use xlos_render::{Color, FrameStats, Point, Rect, Renderer, RoundedRect, TextStyle};
use xlos_style::RenderConfig;

use super::{Desktop, PowerAction};

const SLEEP_BACKGROUND: Color = Color::from_rgb(6.0 / 255.0, 6.0 / 255.0, 8.0 / 255.0);
const SLEEP_MESSAGE: &str = "Sleeping. Press any key or click to wake";
const TASK_TITLE_CHARS: usize = 18;

impl Desktop {
    /// Draw one complete frame.
    ///
    /// Layers, back to front: wallpaper and its theme wash, icons, windows
    /// bottom to top, taskbar, start menu, power dialog. While asleep only
    /// the sleep screen is drawn. `time` is shown by the taskbar clock.
    pub fn draw(
        &mut self,
        renderer: &mut dyn Renderer,
        config: &RenderConfig,
        time: NaiveTime,
    ) -> FrameStats {
        let _span = tracing::trace_span!(span_names::FRAME).entered();
        if self.sleeping {
            self.draw_sleep(renderer);
            return renderer.end_frame();
        }

        renderer.begin_frame(config.wallpaper(), self.surface);
        let palette = config.palette();
        renderer.fill_rect(Rect::from_size(self.surface), palette.vignette);

        self.draw_icons(renderer, config);

        let focused = self.focused();
        for window in &mut self.windows {
            let is_focused = Some(window.id()) == focused;
            window.render(renderer, config, is_focused);
        }

        self.draw_taskbar(renderer, config, time);
        if self.start_menu_open {
            self.draw_start_menu(renderer, config);
        }
        if self.power_dialog_open {
            self.draw_power_dialog(renderer, config);
        }
        renderer.end_frame()
    }

    fn draw_sleep(&self, renderer: &mut dyn Renderer) {
        renderer.begin_frame(SLEEP_BACKGROUND, self.surface);
        renderer.draw_text(
            SLEEP_MESSAGE,
            Point::new(
                (self.surface.width / 2.0).floor() - 220.0,
                (self.surface.height / 2.0).floor(),
            ),
            &TextStyle::new(20.0, Color::from_rgb8(160, 160, 160)),
        );
    }

    fn draw_icons(&self, renderer: &mut dyn Renderer, config: &RenderConfig) {
        let palette = config.palette();
        let label = TextStyle::new(13.0, palette.text);
        for icon in &self.icons {
            renderer.fill_rounded_rect(RoundedRect::new(icon.rect, 8.0), palette.alt);
            renderer.draw_text(
                &icon.name,
                Point::new(icon.rect.left() - 6.0, icon.rect.bottom() + 6.0),
                &label,
            );
        }
    }

    fn draw_taskbar(&self, renderer: &mut dyn Renderer, config: &RenderConfig, time: NaiveTime) {
        let palette = config.palette();
        let layout = self.layout();

        renderer.fill_rect(layout.taskbar(), palette.alt);

        let start = layout.start_button();
        renderer.fill_rounded_rect(RoundedRect::new(start, 8.0), palette.panel);
        renderer.draw_text(
            "Start",
            Point::new(start.left() + 48.0, start.top() + 6.0),
            &TextStyle::new(18.0, palette.text),
        );

        let focused = self.focused();
        let title_style = TextStyle::new(13.0, palette.text);
        for (slot, window) in self.taskbar_windows().into_iter().enumerate() {
            let button = layout.task_button(slot);
            renderer.fill_rounded_rect(RoundedRect::new(button, 8.0), palette.panel);
            if Some(window.id()) == focused {
                renderer.fill_rect(
                    Rect::new(button.left() + 8.0, button.bottom() - 4.0, button.width() - 16.0, 2.0),
                    palette.accent,
                );
            }
            let title: String = window.title().chars().take(TASK_TITLE_CHARS).collect();
            let style = if window.is_minimized() {
                title_style.with_color(palette.text_muted)
            } else {
                title_style
            };
            renderer.draw_text(
                &title,
                Point::new(button.left() + 8.0, button.top() + 8.0),
                &style,
            );
        }

        renderer.draw_text(
            &time.format("%H:%M:%S").to_string(),
            layout.clock_position(),
            &TextStyle::new(18.0, palette.text),
        );
    }

    fn draw_start_menu(&self, renderer: &mut dyn Renderer, config: &RenderConfig) {
        let palette = config.palette();
        let layout = self.layout();
        let menu = layout.start_menu(self.registry.len());

        renderer.fill_rounded_rect(RoundedRect::new(menu, 8.0), palette.panel);
        renderer.draw_text(
            "XLOS Pro",
            Point::new(menu.left() + 16.0, menu.top() + 12.0),
            &TextStyle::new(20.0, palette.text),
        );

        let item_style = TextStyle::new(13.0, palette.text);
        for (index, name) in self.registry.names().enumerate() {
            let item = layout.start_menu_item(menu, index);
            renderer.fill_rounded_rect(RoundedRect::new(item, 8.0), palette.alt);
            renderer.draw_text(name, Point::new(item.left() + 12.0, item.top() + 8.0), &item_style);
        }

        let power = layout.power_button(menu);
        renderer.fill_rounded_rect(RoundedRect::new(power, 8.0), palette.danger);
        renderer.draw_text(
            "Power",
            Point::new(power.left() + 14.0, power.top() + 10.0),
            &TextStyle::new(18.0, Color::WHITE),
        );
    }

    fn draw_power_dialog(&self, renderer: &mut dyn Renderer, config: &RenderConfig) {
        let palette = config.palette();
        let layout = self.layout();
        let dialog = layout.power_dialog();

        renderer.fill_rounded_rect(RoundedRect::new(dialog, 8.0), palette.panel);
        renderer.draw_text(
            "Power",
            Point::new(dialog.left() + 18.0, dialog.top() + 12.0),
            &TextStyle::new(20.0, palette.text),
        );

        let label = TextStyle::new(13.0, palette.text);
        for action in PowerAction::ALL {
            let button = layout.power_action(action);
            renderer.fill_rounded_rect(RoundedRect::new(button, 8.0), palette.alt);
            renderer.draw_text(
                action.label(),
                Point::new(button.left() + 10.0, button.top() + 10.0),
                &label,
            );
        }
    }
}
