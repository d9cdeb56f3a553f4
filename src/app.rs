use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::countries::{self, Country, CountryCode, CountryError};
use crate::graphql::GraphQLClient;

/// What the display region currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Loaded(Country),
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }
}

/// Transient UI state: the fetched code list, the selected code and the display
///
/// `Loading` is only shown until the first record arrives. Later selections
/// keep the previous record on screen until their own record replaces it.
#[derive(Debug, Clone)]
pub struct App {
    codes: Vec<CountryCode>,
    selected: CountryCode,
    display: DisplayState,
}

impl App {
    pub fn new(initial: CountryCode) -> Self {
        Self {
            codes: Vec::new(),
            selected: initial,
            display: DisplayState::Loading,
        }
    }

    pub fn codes(&self) -> &[CountryCode] {
        &self.codes
    }

    pub fn selected(&self) -> &CountryCode {
        &self.selected
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Replace the code list used for random selection
    pub fn set_codes(&mut self, codes: Vec<CountryCode>) {
        debug!("Code list updated ({} codes)", codes.len());
        self.codes = codes;
    }

    /// Pick a code uniformly from the fetched list and make it the selection
    ///
    /// Returns `None` and leaves the selection untouched while the list is empty.
    pub fn select_random_code<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&CountryCode> {
        let code = self.codes.choose(rng)?.clone();
        self.select(code);
        Some(&self.selected)
    }

    /// Make `code` the selection; the display is left as is until its record arrives
    pub fn select(&mut self, code: CountryCode) {
        debug!("Selected {}", code);
        self.selected = code;
    }

    /// Show a fetched record if it still belongs to the selected code
    ///
    /// Returns whether the record was applied.
    pub fn apply_country(&mut self, code: &CountryCode, country: Country) -> bool {
        if *code != self.selected {
            debug!("Discarding stale record for {} (selected {})", code, self.selected);
            return false;
        }
        self.display = DisplayState::Loaded(country);
        true
    }

    /// Re-select a random country and show its record
    ///
    /// An empty code list (e.g. the startup fetch failed) is fetched again first.
    /// On error the display keeps whatever it showed before.
    pub async fn select_random_country<R: Rng + ?Sized>(
        &mut self,
        client: &GraphQLClient,
        rng: &mut R,
    ) -> Result<&CountryCode, CountryError> {
        if self.codes.is_empty() {
            info!("No country codes loaded, fetching list");
            let codes = countries::get_all_country_codes(client).await?;
            self.set_codes(codes);
        }

        let code = self
            .select_random_code(rng)
            .cloned()
            .ok_or(CountryError::NoCodes)?;

        let country = countries::get_country_info(client, &code).await?;
        self.apply_country(&code, country);

        Ok(&self.selected)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(CountryCode::default())
    }
}
