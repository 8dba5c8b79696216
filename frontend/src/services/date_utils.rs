use js_sys::Date;

/// Current (month, year) in the browser's local time.
pub fn current_period() -> (u32, i32) {
    let now = Date::new_0();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    (month, now.get_full_year() as i32)
}
