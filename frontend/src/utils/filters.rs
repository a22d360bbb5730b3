use crate::api::{Booking, BookingStatus, ClassSchedule, Inquiry, InquiryStatus};

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub fn weekday_name(day: u8) -> &'static str {
    WEEKDAYS.get(day as usize).copied().unwrap_or("?")
}

/// Case-insensitive substring match over any of `fields`. A blank query
/// matches everything.
pub fn matches_search<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Loose `user@domain.tld` shape check; the backend has the final word.
pub fn is_valid_email(email: &str) -> bool {
    email
        .trim()
        .split_once('@')
        .map_or(false, |(user, domain)| {
            !user.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        })
}

pub fn filter_bookings(
    bookings: &[Booking],
    status: Option<BookingStatus>,
    query: &str,
) -> Vec<Booking> {
    let mut result: Vec<Booking> = bookings
        .iter()
        .filter(|b| status.map_or(true, |s| b.status == s))
        .filter(|b| {
            matches_search(
                query,
                [
                    b.member_name.as_str(),
                    b.member_email.as_str(),
                    b.member_phone.as_deref().unwrap_or_default(),
                ],
            )
        })
        .cloned()
        .collect();
    result.sort_by(|a, b| b.created_date.cmp(&a.created_date));
    result
}

pub fn filter_inquiries(
    inquiries: &[Inquiry],
    status: Option<InquiryStatus>,
    query: &str,
) -> Vec<Inquiry> {
    let mut result: Vec<Inquiry> = inquiries
        .iter()
        .filter(|i| status.map_or(true, |s| i.status == s))
        .filter(|i| {
            matches_search(
                query,
                [i.name.as_str(), i.email.as_str(), i.message.as_str()],
            )
        })
        .cloned()
        .collect();
    result.sort_by(|a, b| b.created_date.cmp(&a.created_date));
    result
}

/// Schedules for one club and/or weekday, by day then start time.
pub fn filter_schedules(
    schedules: &[ClassSchedule],
    club_id: Option<&str>,
    day: Option<u8>,
) -> Vec<ClassSchedule> {
    let mut result: Vec<ClassSchedule> = schedules
        .iter()
        .filter(|s| club_id.map_or(true, |club| s.club_id == club))
        .filter(|s| day.map_or(true, |d| s.day_of_week == d))
        .cloned()
        .collect();
    result.sort_by(|a, b| {
        a.day_of_week
            .cmp(&b.day_of_week)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
    result
}

/// Minutes since midnight for a `HH:MM` string.
pub fn parse_clock(value: &str) -> Option<u32> {
    let (h, m) = value.trim().split_once(':')?;
    let (h, m) = (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?);
    (h < 24 && m < 60 && value.trim().len() == 5).then_some(h * 60 + m)
}

pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut dash = false;
    for ch in title.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            dash = false;
        } else if !dash && !slug.is_empty() {
            slug.push('-');
            dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn email_shape() {
        assert!(is_valid_email("coach@ironhall.example"));
        assert!(is_valid_email("  a@b.co "));
        assert!(!is_valid_email("coach"));
        assert!(!is_valid_email("@ironhall.example"));
        assert!(!is_valid_email("coach@localhost"));
        assert!(!is_valid_email("coach@ironhall."));
    }

    fn booking(id: &str, name: &str, status: BookingStatus, day: u32) -> Booking {
        Booking {
            id: id.into(),
            class_id: None,
            schedule_id: None,
            member_name: name.into(),
            member_email: format!("{}@example.com", name.to_lowercase()),
            member_phone: None,
            booking_date: None,
            status,
            notes: None,
            created_date: Some(Utc.with_ymd_and_hms(2026, 1, day, 8, 0, 0).unwrap()),
        }
    }

    fn schedule(id: &str, club: &str, day: u8, start: &str) -> ClassSchedule {
        ClassSchedule {
            id: id.into(),
            class_id: "c1".into(),
            club_id: club.into(),
            day_of_week: day,
            start_time: start.into(),
            end_time: "23:00".into(),
            instructor: None,
            capacity: None,
        }
    }

    #[test]
    fn bookings_filter_by_status_and_search_newest_first() {
        let all = vec![
            booking("b1", "Alice", BookingStatus::Pending, 1),
            booking("b2", "Bob", BookingStatus::Confirmed, 2),
            booking("b3", "Alina", BookingStatus::Pending, 3),
        ];
        let pending = filter_bookings(&all, Some(BookingStatus::Pending), "");
        assert_eq!(
            pending.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(),
            vec!["b3", "b1"]
        );
        let ali = filter_bookings(&all, None, "ALI");
        assert_eq!(ali.len(), 2);
        assert!(filter_bookings(&all, Some(BookingStatus::Cancelled), "").is_empty());
    }

    #[test]
    fn schedules_sort_by_day_then_time() {
        let all = vec![
            schedule("s1", "north", 2, "18:00"),
            schedule("s2", "north", 1, "07:30"),
            schedule("s3", "south", 1, "06:00"),
            schedule("s4", "north", 2, "09:00"),
        ];
        let north = filter_schedules(&all, Some("north"), None);
        assert_eq!(
            north.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            vec!["s2", "s4", "s1"]
        );
        assert_eq!(filter_schedules(&all, None, Some(1)).len(), 2);
    }

    #[test]
    fn clock_parsing_accepts_only_hh_mm() {
        assert_eq!(parse_clock("07:30"), Some(450));
        assert_eq!(parse_clock("24:00"), None);
        assert_eq!(parse_clock("7:30"), None);
        assert_eq!(parse_clock("ab:cd"), None);
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("  5 Tips for Better Squats! "), "5-tips-for-better-squats");
        assert_eq!(slugify("HIIT -- vs. Cardio"), "hiit-vs-cardio");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn weekday_names_cover_the_week() {
        assert_eq!(weekday_name(0), "Sunday");
        assert_eq!(weekday_name(6), "Saturday");
        assert_eq!(weekday_name(9), "?");
    }
}
