/*!
 * Tests for error types
 */

use prova::errors::{AppError, ImportError, SpeechError, StructureError};
use std::io;

#[test]
fn test_importError_fromIo_shouldMapKinds() {
    let not_found = io::Error::new(io::ErrorKind::NotFound, "missing");
    let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
    let other = io::Error::other("broken pipe");

    assert_eq!(ImportError::from_io(&not_found, "a.txt"), ImportError::NotFound("a.txt".to_string()));
    assert_eq!(
        ImportError::from_io(&denied, "a.txt"),
        ImportError::PermissionDenied("a.txt".to_string())
    );
    assert!(matches!(ImportError::from_io(&other, "a.txt"), ImportError::Unreadable(_)));
}

#[test]
fn test_appError_fromSubErrors_shouldWrapAndDisplay() {
    let error: AppError = StructureError::BlankInput.into();
    assert_eq!(error.to_string(), "Structure error: Input text is blank");

    let error: AppError = ImportError::TooLarge { size: 10, max: 5 }.into();
    assert_eq!(error.to_string(), "Import error: Document too large: 10 bytes (max 5)");

    let error: AppError = SpeechError::Unavailable("no voices".to_string()).into();
    assert!(matches!(error, AppError::Speech(_)));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let error: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, AppError::File(_)));
}
