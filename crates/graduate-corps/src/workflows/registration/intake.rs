use super::domain::RegistrationForm;
use crate::workflows::roster::validator::{is_valid_email, is_valid_phone};

pub(crate) const MIN_PASSWORD_LENGTH: usize = 8;

/// Validates the full registration payload before any side effect.
///
/// Every violation is reported in one list so the graduate can correct the
/// form in a single pass; nothing here touches storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationIntake;

impl RegistrationIntake {
    pub fn validate(&self, form: &RegistrationForm) -> Vec<String> {
        let mut errors = Vec::new();

        if !is_valid_email(form.personal.email.trim()) {
            errors.push("Email must be a valid email address".to_string());
        }
        required(&mut errors, "Marital status", &form.personal.marital_status);
        required(&mut errors, "State of origin", &form.personal.state_of_origin);
        required(
            &mut errors,
            "Residential address",
            &form.personal.residential_address,
        );

        required(&mut errors, "Next of kin name", &form.family.next_of_kin_name);
        if !is_valid_phone(form.family.next_of_kin_phone.trim()) {
            errors.push(
                "Next of kin phone must start with + and use only digits, spaces, hyphens, or parentheses"
                    .to_string(),
            );
        }
        required(
            &mut errors,
            "Next of kin relationship",
            &form.family.next_of_kin_relationship,
        );

        required(
            &mut errors,
            "Highest qualification",
            &form.education.highest_qualification,
        );

        required(&mut errors, "Testimony", &form.spiritual.testimony);

        if form.test_answers.is_empty() {
            errors.push("Test questions must be answered".to_string());
        }
        for answer in &form.test_answers {
            if answer.answer.trim().is_empty() {
                errors.push(format!("Answer to '{}' is required", answer.question));
            }
        }

        if form.credentials.password.len() < MIN_PASSWORD_LENGTH {
            errors.push(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ));
        }
        if form.credentials.password != form.credentials.confirm_password {
            errors.push("Password confirmation does not match".to_string());
        }

        errors
    }
}

fn required(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    }
}
