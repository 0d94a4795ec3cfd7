//! The platform's forms and upload checks.

use super::{FieldSpec, Form, Rule, ValidationErrors, MIN_PASSWORD_LENGTH, REQUIRED_MESSAGE};
use crate::models::{LoginRequest, ReleaseUpload, SignupRequest};
use chrono::NaiveDate;

/// Accepted audio file extensions.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg"];

/// Accepted artwork file extensions.
pub const ARTWORK_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Largest accepted artwork file.
pub const MAX_ARTWORK_BYTES: usize = 10 * 1024 * 1024;

fn password_rules() -> Vec<Rule> {
    vec![Rule::Required, Rule::MinLength(MIN_PASSWORD_LENGTH)]
}

/// Email and password.
pub fn login_form() -> Form {
    Form::new(vec![
        FieldSpec::new("email", vec![Rule::Required, Rule::Email]),
        FieldSpec::new("password", password_rules()),
    ])
}

/// Account creation.
pub fn signup_form() -> Form {
    Form::new(vec![
        FieldSpec::new("firstname", vec![Rule::Required]),
        FieldSpec::new("lastname", vec![Rule::Required]),
        FieldSpec::new("email", vec![Rule::Required, Rule::Email]),
        FieldSpec::new("password", password_rules()),
    ])
}

/// Text fields of the track upload.
pub fn upload_form() -> Form {
    Form::new(vec![
        FieldSpec::new("title", vec![Rule::Required]),
        FieldSpec::new("artist", vec![Rule::Required]),
        FieldSpec::new("album", vec![]),
        FieldSpec::new("genre", vec![Rule::Required]),
        FieldSpec::new("release_date", vec![Rule::Required]),
        FieldSpec::new("description", vec![]),
        FieldSpec::new("tags", vec![]),
    ])
}

/// Submits a login form and builds the request payload.
pub fn login_request(form: &mut Form) -> Result<LoginRequest, ValidationErrors> {
    let mut values = form.submit()?;
    Ok(LoginRequest {
        email: values.remove("email").unwrap_or_default(),
        password: values.remove("password").unwrap_or_default(),
    })
}

/// Submits a signup form and builds the request payload.
pub fn signup_request(form: &mut Form) -> Result<SignupRequest, ValidationErrors> {
    let mut values = form.submit()?;
    Ok(SignupRequest {
        firstname: values.remove("firstname").unwrap_or_default(),
        lastname: values.remove("lastname").unwrap_or_default(),
        email: values.remove("email").unwrap_or_default(),
        password: values.remove("password").unwrap_or_default(),
    })
}

fn has_extension(ext: Option<String>, allowed: &[&str]) -> bool {
    ext.map_or(false, |e| allowed.contains(&e.as_str()))
}

/// Checks an upload before it is sent.
///
/// Runs the upload form rules over the text fields, then checks the release
/// date format and the attached files.
pub fn validate_upload(upload: &ReleaseUpload) -> Result<(), ValidationErrors> {
    let mut form = upload_form();
    let text_fields = [
        ("title", Some(&upload.title)),
        ("artist", Some(&upload.artist)),
        ("album", upload.album.as_ref()),
        ("genre", Some(&upload.genre)),
        ("release_date", Some(&upload.release_date)),
        ("description", upload.description.as_ref()),
        ("tags", upload.tags.as_ref()),
    ];
    for (name, value) in text_fields {
        form.input(name, value.cloned().unwrap_or_default());
    }

    let mut errors = match form.submit() {
        Ok(_) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if errors.get("release_date").is_none()
        && NaiveDate::parse_from_str(upload.release_date.trim(), "%Y-%m-%d").is_err()
    {
        errors.push("release_date", "Release date must be in YYYY-MM-DD format");
    }

    if upload.audio.is_empty() {
        errors.push(ReleaseUpload::AUDIO_FIELD, REQUIRED_MESSAGE);
    } else if !has_extension(upload.audio.extension(), AUDIO_EXTENSIONS) {
        errors.push(
            ReleaseUpload::AUDIO_FIELD,
            "Invalid file type. Use MP3, WAV, FLAC, AAC, or OGG",
        );
    }

    if let Some(artwork) = &upload.artwork {
        if !has_extension(artwork.extension(), ARTWORK_EXTENSIONS) {
            errors.push(
                ReleaseUpload::ARTWORK_FIELD,
                "Invalid file type. Use JPG, PNG, or GIF",
            );
        } else if artwork.len() > MAX_ARTWORK_BYTES {
            errors.push(
                ReleaseUpload::ARTWORK_FIELD,
                "File too large. Maximum size is 10MB",
            );
        }
    }

    errors.into_result()
}
