//! Continuation links between watch sessions.
//!
//! A session may name another as its parent via `parent_date_id`. Links are
//! resolved one level deep on read by scanning the session list; nothing is
//! indexed and no cycle detection is done.

use datenight_models::{LinkedWatchSession, WatchSession};

/// Sessions whose `parent_date_id` is `id`
pub fn children_of(sessions: &[WatchSession], id: u64) -> Vec<WatchSession> {
    sessions
        .iter()
        .filter(|s| s.parent_date_id == Some(id))
        .cloned()
        .collect()
}

/// The session `session` continues, if it names one that still exists
pub fn parent_of(sessions: &[WatchSession], session: &WatchSession) -> Option<WatchSession> {
    let parent_id = session.parent_date_id?;
    sessions.iter().find(|s| s.id == parent_id).cloned()
}

/// Attach direct children and the direct parent to `session`
pub fn link(sessions: &[WatchSession], session: &WatchSession) -> LinkedWatchSession {
    LinkedWatchSession {
        linked_dates: children_of(sessions, session.id),
        parent_date: parent_of(sessions, session),
        session: session.clone(),
    }
}

/// Ids removed when `id` is deleted: the session itself and its direct children.
/// Grandchildren are left in place with a dangling parent reference.
pub fn cascade_ids(sessions: &[WatchSession], id: u64) -> Vec<u64> {
    std::iter::once(id)
        .chain(
            sessions
                .iter()
                .filter(|s| s.parent_date_id == Some(id) && s.id != id)
                .map(|s| s.id),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::NewWatchSession;
    use chrono::Utc;

    fn session(id: u64, parent: Option<u64>) -> WatchSession {
        let mut new = NewWatchSession::new(format!("tt{}", id), format!("Movie {}", id));
        new.parent_date_id = parent;
        new.into_session(id, Utc::now())
    }

    #[test]
    fn test_link_is_single_level() {
        let sessions = vec![session(1, None), session(2, Some(1)), session(3, Some(2)), session(4, Some(1))];

        let linked = link(&sessions, &sessions[1]);
        assert_eq!(linked.parent_date.as_ref().map(|p| p.id), Some(1));
        assert_eq!(linked.linked_dates.iter().map(|s| s.id).collect::<Vec<_>>(), vec![3]);

        let root = link(&sessions, &sessions[0]);
        assert!(root.parent_date.is_none());
        assert_eq!(root.linked_dates.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_dangling_parent_resolves_to_none() {
        let sessions = vec![session(5, Some(99))];
        assert!(parent_of(&sessions, &sessions[0]).is_none());
    }

    #[test]
    fn test_cascade_ids_direct_children_only() {
        let sessions = vec![session(1, None), session(2, Some(1)), session(3, Some(2)), session(4, Some(1))];
        assert_eq!(cascade_ids(&sessions, 1), vec![1, 2, 4]);
        assert_eq!(cascade_ids(&sessions, 3), vec![3]);
    }
}
