//! Column Role Resolver
//! Maps raw spreadsheet headers to the logical fields the analysis needs.

use std::fmt;

/// Logical field an analysis reads from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Timestamp,
    Event,
    Shift,
    Grant,
    Engagement,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Timestamp,
        Role::Event,
        Role::Shift,
        Role::Grant,
        Role::Engagement,
    ];

    /// Lower-case header fragments that identify this role, in priority order.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Role::Timestamp => &[
                "момент подачи заявления",
                "timestamp",
                "дата",
                "время",
                "time",
                "date",
            ],
            Role::Event => &["наименование мероприятия", "мероприятие", "event", "title"],
            Role::Shift => &["наименование смены", "смена", "shift", "theme"],
            Role::Grant => &[
                "анкета_планируете ли вы участвовать",
                "грант",
                "grant",
                "конкурс",
            ],
            Role::Engagement => &[
                "вовлеченность",
                "engagement",
                "активность",
                "activity",
                "рейтинг",
                "rating",
            ],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Timestamp => "timestamp",
            Role::Event => "event",
            Role::Shift => "shift",
            Role::Grant => "grant",
            Role::Engagement => "engagement",
        };
        f.write_str(name)
    }
}

/// Resolved header for each role. `None` means no header matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub timestamp: Option<String>,
    pub event: Option<String>,
    pub shift: Option<String>,
    pub grant: Option<String>,
    pub engagement: Option<String>,
}

impl ColumnRoles {
    /// Scan headers once per role; the first header containing any synonym wins.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut roles = ColumnRoles::default();
        for role in Role::ALL {
            let found = headers
                .iter()
                .map(AsRef::as_ref)
                .find(|header| Self::matches(header, role))
                .map(str::to_string);
            *roles.slot_mut(role) = found;
        }
        roles
    }

    fn matches(header: &str, role: Role) -> bool {
        let lowered = header.to_lowercase();
        role.synonyms().iter().any(|name| lowered.contains(name))
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Timestamp => &mut self.timestamp,
            Role::Event => &mut self.event,
            Role::Shift => &mut self.shift,
            Role::Grant => &mut self.grant,
            Role::Engagement => &mut self.engagement,
        }
    }

    /// Header resolved for a role, if any.
    pub fn get(&self, role: Role) -> Option<&str> {
        let slot = match role {
            Role::Timestamp => &self.timestamp,
            Role::Event => &self.event,
            Role::Shift => &self.shift,
            Role::Grant => &self.grant,
            Role::Engagement => &self.engagement,
        };
        slot.as_deref()
    }

    /// Roles no header matched.
    pub fn unresolved(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }
}
