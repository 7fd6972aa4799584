// Clinio
// Copyright (C) 2025 Clinio Health

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Static tab registry
//!
//! Tabs are the protected feature areas of the application. The set is
//! closed and known at build time; identifiers arriving from outside the
//! registry fail to parse and resolution degrades to no access.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A protected resource/feature area
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    ClientIntake,
    DailySchedule,
    FullHistory,
    MyPatients,
    Reports,
    Finance,
    Inventory,
    Employees,
    CoordinatorBoard,
}

impl Tab {
    /// Ordered catalogue of all tabs, as presented to administrators
    pub const ALL: [Tab; 9] = [
        Tab::ClientIntake,
        Tab::DailySchedule,
        Tab::FullHistory,
        Tab::MyPatients,
        Tab::Reports,
        Tab::Finance,
        Tab::Inventory,
        Tab::Employees,
        Tab::CoordinatorBoard,
    ];

    /// Stable slug, matching the serialized representation
    pub fn slug(self) -> &'static str {
        match self {
            Tab::ClientIntake => "client-intake",
            Tab::DailySchedule => "daily-schedule",
            Tab::FullHistory => "full-history",
            Tab::MyPatients => "my-patients",
            Tab::Reports => "reports",
            Tab::Finance => "finance",
            Tab::Inventory => "inventory",
            Tab::Employees => "employees",
            Tab::CoordinatorBoard => "coordinator-board",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Tab::ClientIntake => "Client Intake",
            Tab::DailySchedule => "Daily Schedule",
            Tab::FullHistory => "Full History",
            Tab::MyPatients => "My Patients",
            Tab::Reports => "Reports",
            Tab::Finance => "Finance",
            Tab::Inventory => "Inventory",
            Tab::Employees => "Employees",
            Tab::CoordinatorBoard => "Coordinator Board",
        }
    }

    /// Parse a slug; `None` for identifiers outside the registry
    pub fn parse(slug: &str) -> Option<Tab> {
        Tab::ALL.iter().copied().find(|tab| tab.slug() == slug)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
