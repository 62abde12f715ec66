use serde::Serialize;

/// One extracurricular offering. The activity name is the key of the
/// directory map and is not repeated inside the record, matching the wire
/// shape of `GET /activities`.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: usize,
    /// Registered emails in signup order. Uniqueness is enforced by the
    /// service layer at signup time, not by the container.
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(description: &str, schedule: &str, max_participants: usize) -> Self {
        Activity {
            description: description.to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants(mut self, emails: &[&str]) -> Self {
        self.participants = emails.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }
}
