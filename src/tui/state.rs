use crate::geo::table::{division_of, DIVISIONS};
use crate::models::{AppTheme, District};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Prayer,
    Donations,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Prayer, Tab::Donations];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "হোম",
            Tab::Prayer => "সময়সূচী",
            Tab::Donations => "অনুদান",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Home => Tab::Prayer,
            Tab::Prayer => Tab::Donations,
            Tab::Donations => Tab::Home,
        }
    }
}

/// Which list the district picker is moving through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerFocus {
    #[default]
    Division,
    District,
}

/// Everything the dashboard shows that is not derived from the clock.
/// Changed only through the setters below.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    tab: Tab,
    theme: AppTheme,
    district: District,
    show_help: bool,
    rotation_paused: bool,
    banner_idx: usize,
    donation_idx: usize,
    tasbih: u32,
    division_cursor: usize,
    district_cursor: usize,
    picker_focus: PickerFocus,
    donation_cursor: usize,
    donation_detail: bool,
    flash: Option<String>,
}

impl AppState {
    pub fn new(theme: AppTheme, district: District) -> Self {
        let division_cursor = division_of(&district)
            .and_then(|d| DIVISIONS.iter().position(|x| x.name == d.name))
            .unwrap_or(0);
        let district_cursor = DIVISIONS[division_cursor]
            .districts
            .iter()
            .position(|d| d.name == district.name)
            .unwrap_or(0);
        Self {
            tab: Tab::Home,
            theme,
            district,
            show_help: false,
            rotation_paused: false,
            banner_idx: 0,
            donation_idx: 0,
            tasbih: 0,
            division_cursor,
            district_cursor,
            picker_focus: PickerFocus::Division,
            donation_cursor: 0,
            donation_detail: false,
            flash: None,
        }
    }

    // ─── Getters ─────────────────────────────────────────────────────────────

    pub fn tab(&self) -> Tab {
        self.tab
    }
    pub fn theme(&self) -> AppTheme {
        self.theme
    }
    pub fn district(&self) -> &District {
        &self.district
    }
    pub fn show_help(&self) -> bool {
        self.show_help
    }
    pub fn rotation_paused(&self) -> bool {
        self.rotation_paused
    }
    pub fn banner_idx(&self) -> usize {
        self.banner_idx
    }
    pub fn donation_idx(&self) -> usize {
        self.donation_idx
    }
    pub fn tasbih(&self) -> u32 {
        self.tasbih
    }
    pub fn division_cursor(&self) -> usize {
        self.division_cursor
    }
    pub fn district_cursor(&self) -> usize {
        self.district_cursor
    }
    pub fn picker_focus(&self) -> PickerFocus {
        self.picker_focus
    }
    pub fn donation_cursor(&self) -> usize {
        self.donation_cursor
    }
    pub fn donation_detail(&self) -> bool {
        self.donation_detail
    }
    pub fn flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    // ─── Setters ─────────────────────────────────────────────────────────────

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.donation_detail = false;
        self.flash = None;
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn set_theme(&mut self, theme: AppTheme) {
        self.theme = theme;
    }

    pub fn cycle_theme(&mut self) -> AppTheme {
        self.theme = self.theme.next();
        self.theme
    }

    pub fn set_district(&mut self, district: District) {
        self.district = district;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_rotation(&mut self) {
        self.rotation_paused = !self.rotation_paused;
    }

    pub fn increment_tasbih(&mut self) {
        self.tasbih = self.tasbih.saturating_add(1);
    }

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash = Some(message.into());
    }

    /// Advance both carousels one step unless rotation is paused.
    pub fn rotate(&mut self, banner_count: usize, donation_count: usize) {
        if self.rotation_paused {
            return;
        }
        if banner_count > 0 {
            self.banner_idx = (self.banner_idx + 1) % banner_count;
        }
        if donation_count > 0 {
            self.donation_idx = (self.donation_idx + 1) % donation_count;
        }
    }

    // ─── District picker ─────────────────────────────────────────────────────

    pub fn picker_left(&mut self) {
        self.picker_focus = PickerFocus::Division;
    }

    pub fn picker_right(&mut self) {
        self.picker_focus = PickerFocus::District;
    }

    pub fn picker_move(&mut self, down: bool) {
        match self.picker_focus {
            PickerFocus::Division => {
                self.division_cursor = step(self.division_cursor, DIVISIONS.len(), down);
                self.district_cursor = 0;
            }
            PickerFocus::District => {
                let len = DIVISIONS[self.division_cursor].districts.len();
                self.district_cursor = step(self.district_cursor, len, down);
            }
        }
    }

    /// The district under the cursor, once the cursor is in the district list.
    pub fn picker_choice(&self) -> Option<District> {
        if self.picker_focus != PickerFocus::District {
            return None;
        }
        DIVISIONS
            .get(self.division_cursor)?
            .districts
            .get(self.district_cursor)
            .map(|d| d.to_district())
    }

    // ─── Donation list ───────────────────────────────────────────────────────

    pub fn donation_move(&mut self, down: bool, len: usize) {
        self.donation_cursor = step(self.donation_cursor, len, down);
    }

    /// New donations are prepended, so keep the cursor on the newest.
    pub fn reset_donation_cursor(&mut self) {
        self.donation_cursor = 0;
        self.donation_idx = 0;
    }

    pub fn open_donation_detail(&mut self) {
        self.donation_detail = true;
    }

    pub fn close_donation_detail(&mut self) {
        self.donation_detail = false;
        self.flash = None;
    }
}

fn step(current: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (current + 1).min(len - 1)
    } else {
        current.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::table::default_district;

    fn state() -> AppState {
        AppState::new(AppTheme::Emerald, default_district())
    }

    #[test]
    fn tabs_cycle() {
        let mut s = state();
        s.next_tab();
        assert_eq!(s.tab(), Tab::Prayer);
        s.next_tab();
        s.next_tab();
        assert_eq!(s.tab(), Tab::Home);
    }

    #[test]
    fn theme_cycles_through_all() {
        let mut s = state();
        assert_eq!(s.cycle_theme(), AppTheme::Golden);
        assert_eq!(s.cycle_theme(), AppTheme::Indigo);
        assert_eq!(s.cycle_theme(), AppTheme::Emerald);
    }

    #[test]
    fn rotation_wraps_and_pauses() {
        let mut s = state();
        s.rotate(3, 2);
        s.rotate(3, 2);
        assert_eq!((s.banner_idx(), s.donation_idx()), (2, 0));
        s.toggle_rotation();
        s.rotate(3, 2);
        assert_eq!(s.banner_idx(), 2);
        s.toggle_rotation();
        s.rotate(3, 0);
        assert_eq!((s.banner_idx(), s.donation_idx()), (0, 0));
    }

    #[test]
    fn picker_starts_on_current_district() {
        let s = AppState::new(AppTheme::Emerald, District::new("রাজশাহী", 6));
        let division = &DIVISIONS[s.division_cursor()];
        assert_eq!(division.districts[s.district_cursor()].name, "রাজশাহী");
    }

    #[test]
    fn picker_choice_needs_district_focus() {
        let mut s = state();
        assert_eq!(s.picker_choice(), None);
        s.picker_right();
        s.picker_move(true);
        let choice = s.picker_choice().unwrap();
        assert_eq!(choice, DIVISIONS[0].districts[1].to_district());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut s = state();
        s.donation_move(false, 3);
        assert_eq!(s.donation_cursor(), 0);
        for _ in 0..5 {
            s.donation_move(true, 3);
        }
        assert_eq!(s.donation_cursor(), 2);
    }

    #[test]
    fn tasbih_counts() {
        let mut s = state();
        s.increment_tasbih();
        s.increment_tasbih();
        assert_eq!(s.tasbih(), 2);
    }
}
