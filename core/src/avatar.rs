//! Gender-code to avatar-image resolution.
//!
//! Pure and total: every input maps to one of exactly two bundled images.

/// The two bundled avatar assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarImage {
    Female,
    Male,
}

impl AvatarImage {
    /// File name of the bundled asset backing this avatar.
    pub const fn asset(self) -> &'static str {
        match self {
            AvatarImage::Female => "girl-bw.png",
            AvatarImage::Male => "boy-bw.png",
        }
    }
}

/// Select the avatar for a gender code.
///
/// Case-insensitive match against "female"; everything else, including a
/// missing or unrecognized code, selects the male/default image.
pub fn avatar_for(gender_code: Option<&str>) -> AvatarImage {
    match gender_code {
        Some(code) if code.eq_ignore_ascii_case("female") => AvatarImage::Female,
        _ => AvatarImage::Male,
    }
}
