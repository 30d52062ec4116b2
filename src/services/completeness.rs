// src/services/completeness.rs

use crate::models::EmployeeProfile;

type Check = fn(&EmployeeProfile) -> bool;

/// Fields a profile needs before HR considers it complete. All checks weigh
/// the same.
const CHECKLIST: [Check; 10] = [
    |p| filled(p.personal_info.as_ref().and_then(|i| i.first_name.as_deref())),
    |p| filled(p.personal_info.as_ref().and_then(|i| i.last_name.as_deref())),
    |p| p.personal_info.as_ref().is_some_and(|i| i.date_of_birth.is_some()),
    |p| {
        p.contact_info
            .as_ref()
            .is_some_and(|c| c.emails.iter().any(|e| filled(Some(e.address.as_str()))))
    },
    |p| {
        p.contact_info
            .as_ref()
            .is_some_and(|c| c.phones.iter().any(|ph| filled(Some(ph.number.as_str()))))
    },
    |p| filled(p.work_info.as_ref().and_then(|w| w.position.as_deref())),
    |p| filled(p.work_info.as_ref().and_then(|w| w.department.as_deref())),
    |p| filled(p.banking_info.as_ref().and_then(|b| b.bank_name.as_deref())),
    |p| p.skills.iter().any(|s| filled(Some(s.as_str()))),
    |p| {
        filled(
            p.contact_info
                .as_ref()
                .and_then(|c| c.address.as_ref())
                .and_then(|a| a.city.as_deref()),
        )
    },
];

fn filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Share of checklist fields present on `profile`, as a whole percentage.
pub fn profile_completeness(profile: &EmployeeProfile) -> u8 {
    let total = CHECKLIST.len();
    let present = CHECKLIST.iter().filter(|check| check(profile)).count();
    // round half up
    ((present * 100 + total / 2) / total) as u8
}
