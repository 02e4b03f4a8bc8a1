// Values
pub const STUDENT_NOT_FOUND_MESSAGE: &str =
    "Student not found. Please check your details and try again.";

pub const CERTIFICATE_FILE_NAME: &str = "certificate.png";

pub const CERTIFICATE_MIME_TYPE: &str = "image/png";

/// First eight bytes of every PNG stream
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

// Roster columns
pub const NAME_COLUMN: &str = "name";
pub const EMAIL_COLUMN: &str = "email";
pub const COURSE_COLUMN: &str = "course";
