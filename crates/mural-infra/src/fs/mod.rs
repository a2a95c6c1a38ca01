pub mod app_data_dir;
pub mod binding_repo;
pub mod folder_store;
pub mod picker;

pub use binding_repo::FileBindingRepository;
pub use folder_store::FsFolderStore;
pub use picker::RfdFolderPicker;
