use chrono::{DateTime, Utc};
use datenight_models::{IncompleteDate, WatchSession, WatchStatus};

/// "March 9, 2024"
pub fn format_watch_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Partial sessions shaped for the "continue watching" picker, most recent first.
/// With `user_id`, only sessions that user took part in.
pub fn incomplete_dates(sessions: &[WatchSession], user_id: Option<&str>, now: DateTime<Utc>) -> Vec<IncompleteDate> {
    let mut dates: Vec<IncompleteDate> = sessions
        .iter()
        .filter(|s| s.watch_status == WatchStatus::Partial)
        .filter(|s| user_id.map_or(true, |u| s.has_participant(u)))
        .map(|s| IncompleteDate {
            id: s.id,
            movie_id: s.movie_id.clone(),
            movie_title: s.movie_title.clone(),
            movie_year: s.movie_year.clone(),
            movie_poster: s.movie_poster.clone(),
            content_type: s.content_type,
            date_watched: s.date_watched,
            location: s.location.clone(),
            watch_progress: s.watch_progress,
            formatted_date: format_watch_date(&s.date_watched),
            days_ago: (now - s.date_watched).num_days(),
        })
        .collect();

    dates.sort_by(|a, b| b.date_watched.cmp(&a.date_watched));
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{parse_date_watched, NewWatchSession};
    use datenight_models::Participant;

    fn partial(id: u64, date: &str, users: &[&str]) -> WatchSession {
        let mut new = NewWatchSession::new(format!("tv_{}", id), format!("Show {}", id));
        new.watch_status = WatchStatus::Partial;
        new.watch_progress = Some(40.0);
        new.date_watched = Some(parse_date_watched(date).unwrap());
        new.participants = users.iter().map(|u| Participant::new(*u)).collect();
        new.into_session(id, Utc::now())
    }

    #[test]
    fn test_format_watch_date() {
        let date = parse_date_watched("2024-03-09T21:00:00Z").unwrap();
        assert_eq!(format_watch_date(&date), "March 9, 2024");
    }

    #[test]
    fn test_incomplete_dates_sorted_and_annotated() {
        let now = parse_date_watched("2024-03-20T12:00:00Z").unwrap();
        let mut done = partial(3, "2024-03-19", &["user1"]);
        done.watch_status = WatchStatus::Continued;
        let sessions = vec![partial(1, "2024-03-01", &["user1"]), partial(2, "2024-03-13", &["user2"]), done];

        let dates = incomplete_dates(&sessions, None, now);
        assert_eq!(dates.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(dates[0].days_ago, 7);
        assert_eq!(dates[1].formatted_date, "March 1, 2024");

        let mine = incomplete_dates(&sessions, Some("user1"), now);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, 1);
    }
}
