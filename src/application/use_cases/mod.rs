/// Use cases module containing application business logic orchestration
mod inspect_assets;

pub use inspect_assets::{InspectAssetsUseCase, ASSETS_FILE_NAME};
