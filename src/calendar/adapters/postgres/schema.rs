//! Diesel schema for the holiday calendar.

diesel::table! {
    /// Calendar days, flagged when they are holidays.
    calendars (date) {
        /// Calendar date.
        date -> Date,
        /// Year of `date`.
        year -> Integer,
        /// Month of `date` (1-12).
        month -> Integer,
        /// Whether the day is a holiday.
        is_holiday -> Bool,
        /// Holiday name.
        #[max_length = 100]
        holiday_name -> Nullable<Varchar>,
        /// Optional description.
        description -> Nullable<Text>,
    }
}
