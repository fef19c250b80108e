//! Application-level coordination and workflow management.
//!
//! Handles the add/delete workflows, map clicks, geocoder searches and the
//! results of background requests.

use std::path::Path;

use anyhow::Context as _;
use declimag::utm::zone_for;
use declimag::{CoordinateConverter, GeoPoint, HttpClient, PointRecord};
use crate::app::AppState;
use crate::io::{AsyncLoader, LoadResult};
use crate::state::NotificationLevel;
use crate::utils::format_utm_readout;

/// Zoom applied when jumping to a geocoder hit.
const SEARCH_HIT_ZOOM: f64 = 13.0;

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Validating and storing new points
/// - Deleting points by name
/// - Tracking the last clicked map location
/// - Starting and completing background requests
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Converts the add-point form and appends the resulting record.
    ///
    /// Conversion runs first, so a bad coordinate is reported even when the
    /// name is empty. An empty name leaves the session unchanged.
    pub fn add_point(state: &mut AppState, converter: &dyn CoordinateConverter) {
        let form = state.forms.add_form();
        let utm = form.coordinate();

        let position = match converter.utm_to_geographic(&utm) {
            Ok(position) => position,
            Err(e) => {
                log::warn!("UTM conversion failed for {:?}: {}", utm, e);
                state.notifications.push(
                    NotificationLevel::Error,
                    format!("No se pudo convertir UTM→WGS84: {}", e),
                );
                return;
            }
        };

        if form.name().is_empty() {
            state.notifications.push(
                NotificationLevel::Warning,
                "Asigna un nombre al punto antes de agregarlo.",
            );
            return;
        }

        let record = PointRecord::new(form.name(), position, form.date());
        log::info!(
            "added point {} at lat={:.6} lon={:.6} ({})",
            record.name, record.lat, record.lon, record.date
        );
        state
            .notifications
            .push(NotificationLevel::Success, format!("Agregado: {}", record.name));
        state.session.add_point(record);
    }

    /// Removes every record named `name`.
    pub fn delete_point(state: &mut AppState, name: &str) {
        let removed = state.session.remove_by_name(name);
        log::info!("removed {} point(s) named {}", removed, name);

        // Indices shift after a removal, so an open popup may now name another record
        if removed > 0 {
            state.map.close_popup();
        }
        let names = state.session.names();
        let count = state.session.len();
        state.map.retain_layers(&names, count);
        state.forms.clear_delete_selection();

        state
            .notifications
            .push(NotificationLevel::Info, format!("Borrado: {}", name));
    }

    /// Records a click on empty map.
    pub fn handle_map_click(state: &mut AppState, point: GeoPoint) {
        log::debug!("map clicked at lat={:.6} lon={:.6}", point.lat, point.lon);
        state.map.set_last_clicked(point);
    }

    /// Opens or closes the popup of the marker at `index`.
    pub fn handle_marker_click(state: &mut AppState, index: usize) {
        if index < state.session.len() {
            state.map.toggle_popup(index);
        }
    }

    /// Recomputes the UTM readout for the last clicked location.
    ///
    /// Called once per frame. The readout is informational and never feeds
    /// back into the session.
    pub fn refresh_readout(state: &mut AppState, converter: &dyn CoordinateConverter) {
        state.readout = state.map.last_clicked().and_then(|point| {
            match converter.geographic_to_utm(point) {
                Ok(utm) => Some(format_utm_readout(&utm)),
                Err(e) => {
                    log::debug!("no UTM readout for zone {}: {}", zone_for(point), e);
                    None
                }
            }
        });
    }

    /// Starts fetching the sidebar animation.
    pub fn start_animation_fetch(state: &AppState, loader: &mut AsyncLoader, ctx: &egui::Context) {
        match HttpClient::new(&state.config.user_agent, state.config.geocoder_url.clone()) {
            Ok(client) => {
                loader.start_animation_fetch(client, state.config.animation_url.clone(), ctx);
            }
            Err(e) => log::warn!("animation disabled: {}", e),
        }
    }

    /// Starts a geocoder query for the text in the search box.
    pub fn request_search(state: &mut AppState, loader: &mut AsyncLoader, ctx: &egui::Context) {
        let query = state.map.search_query().trim().to_string();
        if query.is_empty() {
            return;
        }

        match HttpClient::new(&state.config.user_agent, state.config.geocoder_url.clone()) {
            Ok(client) => {
                log::info!("geocoding {:?}", query);
                state.map.clear_search_results();
                loader.start_search(client, query, ctx);
            }
            Err(e) => state.notifications.push(
                NotificationLevel::Error,
                format!("No se pudo buscar la dirección: {}", e),
            ),
        }
    }

    /// Recenters the map on one of the geocoder hits.
    pub fn select_search_hit(state: &mut AppState, index: usize) {
        if let Some(hit) = state.map.search_results().get(index).cloned() {
            state.session.set_center(hit.position);
            state.session.set_zoom(SEARCH_HIT_ZOOM);
            state.map.clear_search_results();
        }
    }

    /// Checks for finished background requests and applies their results.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if any request completed.
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        let mut completed = false;
        loop {
            match loader.check_completion() {
                LoadResult::None => return completed,
                result => {
                    Self::apply_load_result(state, result);
                    completed = true;
                }
            }
        }
    }

    fn apply_load_result(state: &mut AppState, result: LoadResult) {
        match result {
            LoadResult::Animation(Some(info)) => state.animation = Some(info),
            LoadResult::Animation(None) => log::info!("animation unavailable"),
            LoadResult::AnimationFailed(error) => log::warn!("animation failed: {}", error),
            LoadResult::Geocode { query, hits } => {
                if let Some(first) = hits.first() {
                    state.session.set_center(first.position);
                    state.session.set_zoom(SEARCH_HIT_ZOOM);
                    state.map.set_search_results(hits);
                } else {
                    state.notifications.push(
                        NotificationLevel::Info,
                        format!("Sin resultados para «{}»", query),
                    );
                }
            }
            LoadResult::GeocodeFailed { query, error } => {
                log::warn!("geocoding {:?} failed: {}", query, error);
                state.notifications.push(
                    NotificationLevel::Error,
                    format!("No se pudo buscar la dirección: {}", error),
                );
            }
            LoadResult::None => {}
        }
    }

    /// Looks for the custom marker icon and remembers its image URI.
    ///
    /// A missing icon is not an error: markers fall back to a drawn pin.
    pub fn probe_marker_icon(state: &mut AppState) {
        match icon_uri(&state.config.marker_icon_path) {
            Ok(uri) => state.marker_icon = Some(uri),
            Err(e) => {
                log::info!("using fallback marker: {:#}", e);
                state.marker_icon = None;
            }
        }
    }
}

fn icon_uri(path: &Path) -> anyhow::Result<String> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("marker icon {} not found", path.display()))?;
    Ok(format!("file://{}", absolute.display()))
}
