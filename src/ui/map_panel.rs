//! Map panel UI rendering
//!
//! Handles the central map: tiles, markers and popups on the canvas, plus the
//! floating controls (zoom buttons, geocoder search, fullscreen toggle,
//! layer control, minimap).

use eframe::egui;
use egui::{Align2, RichText};
use declimag::{GeoPoint, MapView, ThemeColors};
use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::rendering::{map_renderer, minimap};
use crate::state::BaseLayer;
use crate::ui::input::map_input_handler::{self, MapInputResult};
use crate::utils::{format_latlng_popup, format_position, offset_to_pos, pos_to_offset};

/// Zoom change applied by the `+`/`-` buttons
const BUTTON_ZOOM_STEP: f64 = 1.0;

/// Result of map panel interactions that need to be handled by the application.
pub enum MapPanelInteraction {
    /// Empty map was clicked
    MapClicked(GeoPoint),
    /// A marker was clicked
    MarkerClicked(usize),
    /// Enter or the search button was pressed in the geocoder box
    SearchRequested,
    /// One of the geocoder hits was picked
    SearchHitSelected(usize),
    /// The fullscreen button was pressed; carries the requested state
    FullscreenToggled(bool),
}

/// Renders the map filling the remaining space of `ui`.
///
/// # Arguments
/// * `ui` - The central panel ui
/// * `state` - Mutable reference to application state
/// * `loader` - Background requests, queried for the search spinner
pub fn render_map_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    loader: &AsyncLoader,
) -> Option<MapPanelInteraction> {
    let mut interaction = None;
    let colors = state.theme.colors();

    let map_rect = ui.available_rect_before_wrap();
    if map_rect.width() < 1.0 || map_rect.height() < 1.0 {
        return None;
    }
    let response = ui.interact(
        map_rect,
        ui.id().with("map_canvas"),
        egui::Sense::click_and_drag(),
    );

    // Input against the layout of the previous view
    let view = current_view(state, map_rect);
    let markers = map_renderer::marker_hits(map_rect, &view, state.session.points(), |name| {
        state.map.is_layer_visible(name)
    });

    let mut center = view.center;
    let mut zoom = view.zoom;
    let mut is_dragging = state.map.is_dragging();
    match map_input_handler::handle_map_input(
        ui.ctx(),
        map_rect,
        &response,
        &view,
        &markers,
        &mut center,
        &mut zoom,
        &mut is_dragging,
    ) {
        MapInputResult::None => {}
        MapInputResult::ViewUpdated => {
            state.session.set_center(center);
            state.session.set_zoom(zoom);
        }
        MapInputResult::MapClicked(point) => interaction = Some(MapPanelInteraction::MapClicked(point)),
        MapInputResult::MarkerClicked(index) => {
            interaction = Some(MapPanelInteraction::MarkerClicked(index))
        }
    }
    state.map.set_dragging(is_dragging);
    if is_dragging {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    }

    // Paint with the updated view
    let view = current_view(state, map_rect);
    let markers = map_renderer::marker_hits(map_rect, &view, state.session.points(), |name| {
        state.map.is_layer_visible(name)
    });
    let provider = match state.map.base_layer() {
        BaseLayer::Street => state.config.street_tiles.clone(),
        BaseLayer::Satellite => state.config.satellite_tiles.clone(),
    };

    let mut map_ui = ui.new_child(egui::UiBuilder::new().max_rect(map_rect));
    map_ui.set_clip_rect(map_rect.intersect(ui.clip_rect()));

    map_ui.painter().rect_filled(map_rect, 0.0, colors.extreme_background);
    map_renderer::paint_tiles(&map_ui, map_rect, &view, &provider);
    map_renderer::paint_markers(&map_ui, &markers, state.marker_icon.as_deref(), &colors);

    if let Some(index) = state.map.open_popup() {
        if let (Some(hit), Some(record)) = (
            markers.iter().find(|hit| hit.index == index),
            state.session.points().get(index),
        ) {
            map_renderer::paint_popup(
                map_ui.painter(),
                map_renderer::marker_popup_tip(hit.anchor),
                &record.popup,
                &colors,
            );
        }
    }

    if let Some(clicked) = state.map.last_clicked() {
        let anchor = offset_to_pos(map_rect, view.to_screen(clicked));
        map_ui.painter().circle_filled(anchor, 3.0, colors.accent);
        map_renderer::paint_popup(map_ui.painter(), anchor, &format_latlng_popup(clicked), &colors);
    }

    map_renderer::paint_scale_bar(map_ui.painter(), map_rect, &view, &colors);
    map_renderer::paint_attribution(map_ui.painter(), map_rect, &provider, &colors);
    map_renderer::show_logo(&mut map_ui, map_rect, &state.config.logo_url);

    render_minimap(&mut map_ui, map_rect, &view, &provider, &colors, state);

    if let Some(hover) = response.hover_pos() {
        if !is_dragging {
            response.on_hover_text_at_pointer(format_position(view.to_geo(pos_to_offset(map_rect, hover))));
        }
    }

    if let Some(control) = render_zoom_and_search(ui.ctx(), map_rect, state, loader) {
        interaction = Some(control);
    }
    if let Some(control) = render_layer_control(ui.ctx(), map_rect, state) {
        interaction = Some(control);
    }

    ui.advance_cursor_after_rect(map_rect);
    interaction
}

fn current_view(state: &AppState, map_rect: egui::Rect) -> MapView {
    MapView::new(
        state.session.center(),
        state.session.zoom(),
        f64::from(map_rect.width()),
        f64::from(map_rect.height()),
    )
}

/// Minimap inset with its show/hide toggle. A click inside the inset
/// recenters the main map.
fn render_minimap(
    map_ui: &mut egui::Ui,
    map_rect: egui::Rect,
    view: &MapView,
    provider: &declimag::TileProvider,
    colors: &ThemeColors,
    state: &mut AppState,
) {
    let visible = state.map.minimap_visible();
    if visible {
        minimap::paint_minimap(map_ui, map_rect, view, provider, colors);
        let inset = minimap::minimap_rect(map_rect);
        let inset_response = map_ui.interact(inset, map_ui.id().with("minimap"), egui::Sense::click());
        if inset_response.clicked() {
            if let Some(pos) = inset_response.interact_pointer_pos() {
                let target = minimap::position_at(&minimap::minimap_view(view), inset, pos);
                state.session.set_center(target);
            }
        }
    }

    let toggle = map_ui.put(
        minimap::toggle_rect(map_rect, visible),
        egui::Button::new(if visible { "⊟" } else { "⊞" }).small(),
    );
    if toggle
        .on_hover_text(if visible { "Ocultar minimapa" } else { "Mostrar minimapa" })
        .clicked()
    {
        state.map.toggle_minimap();
    }
}

/// Zoom buttons and geocoder box in the top-left corner.
fn render_zoom_and_search(
    ctx: &egui::Context,
    map_rect: egui::Rect,
    state: &mut AppState,
    loader: &AsyncLoader,
) -> Option<MapPanelInteraction> {
    let mut interaction = None;

    egui::Area::new(egui::Id::new("map_zoom_search"))
        .fixed_pos(map_rect.left_top() + egui::vec2(10.0, 10.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                egui::Frame::popup(ui.style())
                    .inner_margin(egui::Margin::same(2))
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            let zoom = state.session.zoom();
                            if ui.button(RichText::new(" + ").strong()).on_hover_text("Acercar").clicked() {
                                state.session.set_zoom(zoom.round() + BUTTON_ZOOM_STEP);
                            }
                            if ui.button(RichText::new(" − ").strong()).on_hover_text("Alejar").clicked() {
                                state.session.set_zoom(zoom.round() - BUTTON_ZOOM_STEP);
                            }
                        });
                    });

                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(280.0);
                    ui.horizontal(|ui| {
                        let edit = ui.add(
                            egui::TextEdit::singleline(state.map.search_query_mut())
                                .hint_text("Buscar dirección…")
                                .desired_width(200.0),
                        );
                        let submitted =
                            edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if loader.is_searching() {
                            ui.spinner();
                        } else if ui.button("🔍").clicked() || submitted {
                            interaction = Some(MapPanelInteraction::SearchRequested);
                        }
                    });

                    for (index, hit) in state.map.search_results().iter().enumerate() {
                        if ui
                            .add(egui::Button::new(RichText::new(&hit.display_name).small()).wrap())
                            .clicked()
                        {
                            interaction = Some(MapPanelInteraction::SearchHitSelected(index));
                        }
                    }
                });
            });
        });

    interaction
}

/// Fullscreen button and layer control in the top-right corner.
fn render_layer_control(
    ctx: &egui::Context,
    map_rect: egui::Rect,
    state: &mut AppState,
) -> Option<MapPanelInteraction> {
    let mut interaction = None;

    egui::Area::new(egui::Id::new("map_layer_control"))
        .fixed_pos(map_rect.right_top() + egui::vec2(-10.0, 10.0))
        .pivot(Align2::RIGHT_TOP)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                let fullscreen = state.map.is_fullscreen();
                let hover = if fullscreen { "Salir" } else { "Expandir" };
                if ui.button(" ⛶ ").on_hover_text(hover).clicked() {
                    interaction = Some(MapPanelInteraction::FullscreenToggled(!fullscreen));
                }

                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        let mut base = state.map.base_layer();
                        ui.radio_value(&mut base, BaseLayer::Street, &state.config.street_tiles.name);
                        ui.radio_value(&mut base, BaseLayer::Satellite, &state.config.satellite_tiles.name);
                        if base != state.map.base_layer() {
                            state.map.set_base_layer(base);
                        }

                        let names = state.session.names();
                        if !names.is_empty() {
                            ui.separator();
                        }
                        for name in names {
                            let mut visible = state.map.is_layer_visible(name);
                            if ui.checkbox(&mut visible, name).changed() {
                                state.map.set_layer_visible(name, visible);
                            }
                        }
                    });
                });
            });
        });

    interaction
}
