/*
 * UI Module
 *
 * This module contains the egui control panel. The panel keeps its own
 * slider values; after each frame `sync_world` calls the World setter for
 * every slider that moved, so the engine only ever changes through its
 * public updaters and the change lands on the next tick.
 *
 * Two sliders are shown in friendlier units than the engine uses and are
 * rescaled here before they reach the world: avoid factor as a percentage
 * and centering factor in parts per ten thousand.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::world::{Preset, World};

const AVOID_SCALE: f32 = 100.0;
const CENTERING_SCALE: f32 = 10_000.0;

pub struct ControlPanel {
    pub avoid_percent: f32,
    pub visible_range: f32,
    pub matching_factor: f32,
    pub turn_factor: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub centering_per_ten_thousand: f32,
    pub protected_range: f32,
    pub predator_turn_factor: f32,
    pub predator_range: f32,
    pub edge_margin: f32,
    pub show_debug: bool,
    pub paused: bool,
}

// Requests from the panel that are not plain parameter changes
#[derive(Debug, Default, PartialEq)]
pub struct PanelActions {
    pub preset: Option<Preset>,
    pub step: bool,
}

impl ControlPanel {
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            avoid_percent: params.avoid_factor * AVOID_SCALE,
            visible_range: params.visible_range,
            matching_factor: params.matching_factor,
            turn_factor: params.turn_factor,
            min_speed: params.min_speed,
            max_speed: params.max_speed,
            centering_per_ten_thousand: params.centering_factor * CENTERING_SCALE,
            protected_range: params.protected_range,
            predator_turn_factor: params.predator_turn_factor,
            predator_range: params.predator_range,
            edge_margin: params.edge_margin,
            show_debug: false,
            paused: false,
        }
    }

    // Engine-unit parameters the sliders currently describe
    pub fn to_params(&self) -> SimulationParams {
        SimulationParams {
            avoid_factor: self.avoid_percent / AVOID_SCALE,
            visible_range: self.visible_range,
            matching_factor: self.matching_factor,
            turn_factor: self.turn_factor,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            centering_factor: self.centering_per_ten_thousand / CENTERING_SCALE,
            protected_range: self.protected_range,
            predator_turn_factor: self.predator_turn_factor,
            predator_range: self.predator_range,
            edge_margin: self.edge_margin,
        }
    }

    // Keep the flags, take every slider from `params`
    pub fn load(&mut self, params: &SimulationParams) {
        let flags = (self.show_debug, self.paused);
        *self = Self::from_params(params);
        (self.show_debug, self.paused) = flags;
    }
}

// Draw the control window and collect the user's edits into `panel`
pub fn update_ui(egui: &mut Egui, panel: &mut ControlPanel, debug_info: &DebugInfo) -> PanelActions {
    let mut actions = PanelActions::default();
    let ctx = egui.begin_frame();

    egui::Window::new("Flock Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flocking", |ui| {
                ui.add(egui::Slider::new(&mut panel.avoid_percent, 0.0..=20.0).text("Avoid Factor (%)"));
                ui.add(egui::Slider::new(&mut panel.matching_factor, SimulationParams::get_factor_range()).text("Matching Factor"));
                ui.add(egui::Slider::new(&mut panel.centering_per_ten_thousand, 0.0..=100.0).text("Centering (1/10000)"));
                ui.add(egui::Slider::new(&mut panel.protected_range, SimulationParams::get_radius_range()).text("Protected Range"));
                ui.add(egui::Slider::new(&mut panel.visible_range, SimulationParams::get_radius_range()).text("Visible Range"));
            });

            ui.collapsing("Motion", |ui| {
                ui.add(egui::Slider::new(&mut panel.min_speed, SimulationParams::get_speed_range()).text("Min Speed"));
                ui.add(egui::Slider::new(&mut panel.max_speed, SimulationParams::get_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut panel.turn_factor, SimulationParams::get_turn_factor_range()).text("Turn Factor"));
                ui.add(egui::Slider::new(&mut panel.edge_margin, SimulationParams::get_margin_range()).text("Edge Margin"));
            });

            ui.collapsing("Predator", |ui| {
                ui.label("The pointer acts as a predator while it is over the world");
                ui.add(egui::Slider::new(&mut panel.predator_turn_factor, SimulationParams::get_turn_factor_range()).text("Predator Turn Factor"));
                ui.add(egui::Slider::new(&mut panel.predator_range, SimulationParams::get_radius_range()).text("Predator Range"));
            });

            ui.collapsing("Presets", |ui| {
                ui.horizontal(|ui| {
                    for preset in Preset::ALL {
                        if ui.button(preset.name()).clicked() {
                            actions.preset = Some(preset);
                        }
                    }
                });
            });

            ui.separator();
            ui.checkbox(&mut panel.show_debug, "Show Debug Info");
            ui.checkbox(&mut panel.paused, "Pause Simulation");
            if panel.paused && ui.button("Step").clicked() {
                actions.step = true;
            }
            ui.label(format!("FPS: {:.1}", debug_info.fps));
        });

    actions
}

/// Push every slider that differs from the world's parameters through the
/// matching setter.
pub fn sync_world(panel: &ControlPanel, world: &mut World) {
    let wanted = panel.to_params();
    let current = *world.params();

    // Rescaled sliders must differ in both units, so float rounding in the
    // scale factor never registers as a change
    if wanted.avoid_factor != current.avoid_factor && panel.avoid_percent != current.avoid_factor * AVOID_SCALE {
        world.update_avoid_factor(wanted.avoid_factor);
    }
    if wanted.visible_range != current.visible_range {
        world.update_visible_range(wanted.visible_range);
    }
    if wanted.matching_factor != current.matching_factor {
        world.update_matching_factor(wanted.matching_factor);
    }
    if wanted.turn_factor != current.turn_factor {
        world.update_turn_factor(wanted.turn_factor);
    }
    if wanted.min_speed != current.min_speed {
        world.update_min_speed(wanted.min_speed);
    }
    if wanted.max_speed != current.max_speed {
        world.update_max_speed(wanted.max_speed);
    }
    if wanted.centering_factor != current.centering_factor
        && panel.centering_per_ten_thousand != current.centering_factor * CENTERING_SCALE
    {
        world.update_centering_factor(wanted.centering_factor);
    }
    if wanted.protected_range != current.protected_range {
        world.update_protected_range(wanted.protected_range);
    }
    if wanted.predator_turn_factor != current.predator_turn_factor {
        world.update_predator_turn_factor(wanted.predator_turn_factor);
    }
    if wanted.predator_range != current.predator_range {
        world.update_predator_range(wanted.predator_range);
    }
    if wanted.edge_margin != current.edge_margin {
        world.update_edge_margin(wanted.edge_margin);
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, lines: &[String], window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * lines.len() as f32 + margin;

    draw.rect()
        .x_y(window_rect.right() - panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width / 2.0;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        draw.text(text)
            .x_y(text_x, text_y - i as f32 * line_height)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
