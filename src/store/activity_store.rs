use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::Activity;

/// Owned in-memory table of all activities, keyed by activity name.
///
/// Handlers may run concurrently, so the table sits behind an `RwLock`.
/// The handle is cheap to clone and is handed to axum as router state.
/// Guards are never held across an await point.
#[derive(Clone)]
pub struct ActivityStore {
    inner: Arc<RwLock<BTreeMap<String, Activity>>>,
}

impl ActivityStore {
    pub fn new(activities: BTreeMap<String, Activity>) -> Self {
        ActivityStore {
            inner: Arc::new(RwLock::new(activities)),
        }
    }

    /// The fixed activity set the service boots with. Activities are never
    /// added or removed at runtime; only rosters change.
    pub fn with_seed() -> Self {
        let mut activities = BTreeMap::new();
        activities.insert(
            "Chess Club".to_string(),
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
            )
            .with_participants(&["michael@mergington.edu", "daniel@mergington.edu"]),
        );
        activities.insert(
            "Programming Class".to_string(),
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
            )
            .with_participants(&["emma@mergington.edu", "sophia@mergington.edu"]),
        );
        activities.insert(
            "Gym Class".to_string(),
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
            )
            .with_participants(&["john@mergington.edu", "olivia@mergington.edu"]),
        );
        activities.insert(
            "Soccer Team".to_string(),
            Activity::new(
                "Join the school soccer team and compete in matches",
                "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
                22,
            )
            .with_participants(&["liam@mergington.edu", "noah@mergington.edu"]),
        );
        activities.insert(
            "Basketball Team".to_string(),
            Activity::new(
                "Practice and play basketball with the school team",
                "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(&["ava@mergington.edu", "mia@mergington.edu"]),
        );
        activities.insert(
            "Art Club".to_string(),
            Activity::new(
                "Explore your creativity through painting and drawing",
                "Thursdays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(&["amelia@mergington.edu", "harper@mergington.edu"]),
        );
        activities.insert(
            "Drama Club".to_string(),
            Activity::new(
                "Act, direct, and produce plays and performances",
                "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
                20,
            )
            .with_participants(&["ella@mergington.edu", "scarlett@mergington.edu"]),
        );
        activities.insert(
            "Math Club".to_string(),
            Activity::new(
                "Solve challenging problems and participate in math competitions",
                "Tuesdays, 3:30 PM - 4:30 PM",
                10,
            )
            .with_participants(&["james@mergington.edu", "benjamin@mergington.edu"]),
        );
        activities.insert(
            "Debate Team".to_string(),
            Activity::new(
                "Develop public speaking and argumentation skills",
                "Fridays, 4:00 PM - 5:30 PM",
                12,
            )
            .with_participants(&["charlotte@mergington.edu", "henry@mergington.edu"]),
        );
        ActivityStore::new(activities)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Activity>> {
        self.inner.read().expect("activity store lock poisoned")
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Activity>> {
        self.inner.write().expect("activity store lock poisoned")
    }
}
