use utoipa::OpenApi;

/// API Documentation
///
/// Paths are registered by the router, see [`crate::app`].
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Resources", description = "Study material by branch, semester, subject and chapter"),
        (name = "Events", description = "Academic calendar"),
        (name = "Visitors", description = "Site visit counter"),
        (name = "Feedback", description = "Student suggestions"),
        (name = "Upload", description = "File upload to shared storage"),
        (name = "Health", description = "Liveness endpoints"),
    ),
    info(
        title = "Student Hub API",
        version = "1.0.0",
        description = "Backend for the student resource hub",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
