/// A student's profile record, keyed by identity. All fields are free text;
/// the e-mail is filled in from the session, not edited.
#[derive(Clone, Debug, Default)]
pub struct StudentProfile {
    pub identity: String,
    pub full_name: String,
    pub reg_number: String,
    pub semester: String,
    pub phone: String,
    pub email: String,
    pub batch_stream: String,
}

impl StudentProfile {
    /// Blank profile for a student who has not saved one yet.
    pub fn empty(identity: &str, email: &str) -> StudentProfile {
        StudentProfile {
            identity: identity.to_owned(),
            email: email.to_owned(),
            ..StudentProfile::default()
        }
    }
}
