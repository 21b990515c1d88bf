pub mod api_key;
pub mod auth;
pub mod blurb;
pub mod compile;
pub mod experience;
pub mod job_description;
pub mod profile;
pub mod project;

pub use api_key::{ApiKey, ApiKeyUpdate, NewApiKey};
pub use auth::{LoginResponse, RegisterResponse};
pub use blurb::{
    Blurb, BlurbMode, BlurbType, GenerateBlurbRequest, GenerateBlurbResponse, NewBlurb,
};
pub use compile::{CompileRequest, CompileResponse};
pub use experience::{Experience, ExperienceCategory, ExperienceData};
pub use job_description::{JobAnalysis, JobDescription, JobDescriptionData};
pub use profile::{Photo, Profile, ProfileData, ProfileSaved};
pub use project::{Project, ProjectData};
