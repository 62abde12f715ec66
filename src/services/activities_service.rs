use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::Activity;
use crate::store::ActivityStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignupError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is already signed up")]
    AlreadyRegistered,
    #[error("Activity is full")]
    Full,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnregisterError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is not signed up for this activity")]
    NotRegistered,
}

/// Snapshot of the full directory, in the wire shape of `GET /activities`.
pub fn list_activities(store: &ActivityStore) -> BTreeMap<String, Activity> {
    store.read().clone()
}

/// Adds `email` to the activity's roster. Rejects unknown activities,
/// duplicate registrations and full rosters.
pub fn signup(
    store: &ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<String, SignupError> {
    let mut activities = store.write();
    let activity = activities
        .get_mut(activity_name)
        .ok_or(SignupError::ActivityNotFound)?;

    if activity.participants.iter().any(|p| p == email) {
        return Err(SignupError::AlreadyRegistered);
    }
    if activity.is_full() {
        return Err(SignupError::Full);
    }

    activity.participants.push(email.to_string());
    Ok(format!("Signed up {} for {}", email, activity_name))
}

/// Removes `email` from the activity's roster. Unknown activities and
/// non-participants both report not-found.
pub fn unregister(
    store: &ActivityStore,
    activity_name: &str,
    email: &str,
) -> Result<String, UnregisterError> {
    let mut activities = store.write();
    let activity = activities
        .get_mut(activity_name)
        .ok_or(UnregisterError::ActivityNotFound)?;

    let pos = activity
        .participants
        .iter()
        .position(|p| p == email)
        .ok_or(UnregisterError::NotRegistered)?;

    activity.participants.remove(pos);
    Ok(format!("Unregistered {} from {}", email, activity_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(name: &str, max_participants: usize, emails: &[&str]) -> ActivityStore {
        let mut activities = BTreeMap::new();
        activities.insert(
            name.to_string(),
            Activity::new("test activity", "Mondays", max_participants).with_participants(emails),
        );
        ActivityStore::new(activities)
    }

    #[test]
    fn signup_appends_to_roster() {
        let store = store_with("Chess Club", 12, &["a@mergington.edu"]);
        let msg = signup(&store, "Chess Club", "b@mergington.edu").unwrap();
        assert_eq!(msg, "Signed up b@mergington.edu for Chess Club");

        let snapshot = list_activities(&store);
        assert_eq!(
            snapshot["Chess Club"].participants,
            vec!["a@mergington.edu", "b@mergington.edu"]
        );
    }

    #[test]
    fn signup_rejects_duplicate() {
        let store = store_with("Chess Club", 12, &["a@mergington.edu"]);
        let err = signup(&store, "Chess Club", "a@mergington.edu").unwrap_err();
        assert_eq!(err, SignupError::AlreadyRegistered);
        assert_eq!(list_activities(&store)["Chess Club"].participants.len(), 1);
    }

    #[test]
    fn signup_rejects_unknown_activity() {
        let store = store_with("Chess Club", 12, &[]);
        let err = signup(&store, "Knitting Circle", "a@mergington.edu").unwrap_err();
        assert_eq!(err, SignupError::ActivityNotFound);
    }

    #[test]
    fn signup_rejects_full_roster() {
        let store = store_with("Math Club", 2, &["a@mergington.edu", "b@mergington.edu"]);
        let err = signup(&store, "Math Club", "c@mergington.edu").unwrap_err();
        assert_eq!(err, SignupError::Full);
        assert_eq!(list_activities(&store)["Math Club"].participants.len(), 2);
    }

    #[test]
    fn duplicate_check_wins_over_full_check() {
        // A roster at capacity still reports "already signed up" for a
        // member, not "full".
        let store = store_with("Math Club", 1, &["a@mergington.edu"]);
        let err = signup(&store, "Math Club", "a@mergington.edu").unwrap_err();
        assert_eq!(err, SignupError::AlreadyRegistered);
    }

    #[test]
    fn unregister_removes_participant() {
        let store = store_with("Drama Club", 20, &["a@mergington.edu", "b@mergington.edu"]);
        let msg = unregister(&store, "Drama Club", "a@mergington.edu").unwrap();
        assert_eq!(msg, "Unregistered a@mergington.edu from Drama Club");
        assert_eq!(
            list_activities(&store)["Drama Club"].participants,
            vec!["b@mergington.edu"]
        );
    }

    #[test]
    fn unregister_rejects_non_participant() {
        let store = store_with("Drama Club", 20, &["a@mergington.edu"]);
        let err = unregister(&store, "Drama Club", "b@mergington.edu").unwrap_err();
        assert_eq!(err, UnregisterError::NotRegistered);
    }

    #[test]
    fn unregister_rejects_unknown_activity() {
        let store = store_with("Drama Club", 20, &[]);
        let err = unregister(&store, "Knitting Circle", "a@mergington.edu").unwrap_err();
        assert_eq!(err, UnregisterError::ActivityNotFound);
    }

    #[test]
    fn seed_rosters_respect_capacity() {
        for (name, activity) in list_activities(&ActivityStore::with_seed()) {
            assert!(
                activity.participants.len() <= activity.max_participants,
                "seed roster for {} exceeds capacity",
                name
            );
        }
    }
}
