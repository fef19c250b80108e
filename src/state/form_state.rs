//! Input buffers for the add-point and delete-point popovers.
//!
//! The buffers survive between frames so that a half-filled form is not
//! lost while the user pans the map.

use chrono::NaiveDate;
use declimag::{UtmCoordinate, SUPPORTED_BANDS, SUPPORTED_ZONES};

/// Buffers behind the "add point" popover.
#[derive(Debug, Clone)]
pub struct AddPointForm {
    name: String,
    zone: u8,
    band: char,
    easting: f64,
    northing: f64,
    date: NaiveDate,
}

impl AddPointForm {
    /// Creates an empty form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            zone: SUPPORTED_ZONES[0],
            band: SUPPORTED_BANDS[0],
            easting: 0.0,
            northing: 0.0,
            date: today,
        }
    }

    // ===== Queries =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The UTM input as currently typed.
    pub fn coordinate(&self) -> UtmCoordinate {
        UtmCoordinate::new(self.zone, self.band, self.easting, self.northing)
    }

    // ===== Widget Bindings =====

    pub fn name_mut(&mut self) -> &mut String {
        &mut self.name
    }

    pub fn zone_mut(&mut self) -> &mut u8 {
        &mut self.zone
    }

    pub fn band_mut(&mut self) -> &mut char {
        &mut self.band
    }

    pub fn easting_mut(&mut self) -> &mut f64 {
        &mut self.easting
    }

    pub fn northing_mut(&mut self) -> &mut f64 {
        &mut self.northing
    }

    pub fn date_mut(&mut self) -> &mut NaiveDate {
        &mut self.date
    }
}

/// Buffers for both popovers.
#[derive(Debug, Clone)]
pub struct FormState {
    add: AddPointForm,
    /// Name picked in the delete dropdown
    delete_selection: Option<String>,
    add_open: bool,
    delete_open: bool,
}

impl FormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            add: AddPointForm::new(today),
            delete_selection: None,
            add_open: false,
            delete_open: false,
        }
    }

    // ===== Popover Visibility =====

    pub fn add_open_mut(&mut self) -> &mut bool {
        &mut self.add_open
    }

    pub fn delete_open_mut(&mut self) -> &mut bool {
        &mut self.delete_open
    }

    pub fn toggle_add(&mut self) {
        self.add_open = !self.add_open;
        self.delete_open = false;
    }

    pub fn toggle_delete(&mut self) {
        self.delete_open = !self.delete_open;
        self.add_open = false;
    }

    pub fn add_form(&self) -> &AddPointForm {
        &self.add
    }

    pub fn add_form_mut(&mut self) -> &mut AddPointForm {
        &mut self.add
    }

    // ===== Delete Selection =====

    /// Name to delete, falling back to the first stored name when the
    /// previous pick no longer exists.
    ///
    /// # Arguments
    /// * `names` - Distinct stored names in insertion order
    pub fn delete_target<'a>(&self, names: &[&'a str]) -> Option<&'a str> {
        match &self.delete_selection {
            Some(selected) => names
                .iter()
                .find(|name| **name == selected.as_str())
                .or_else(|| names.first())
                .copied(),
            None => names.first().copied(),
        }
    }

    pub fn select_for_delete(&mut self, name: String) {
        self.delete_selection = Some(name);
    }

    pub fn clear_delete_selection(&mut self) {
        self.delete_selection = None;
    }
}
