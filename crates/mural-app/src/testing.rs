//! In-memory port implementations shared by the crate's tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use mural_core::image::{ImagePayload, MimeType};
use mural_core::manifest::HistoryManifest;
use mural_core::persistence::PersistedState;
use mural_core::ports::{
    BindingRepositoryPort, ClockPort, CreditsSummary, FolderBinding, FolderPickerPort,
    FolderStorePort, GenerationError, GenerationPort, GenerationRequest, GenerationResult,
    MediaProbePort, SessionStorePort,
};

pub fn test_binding() -> FolderBinding {
    FolderBinding {
        directory: "/granted/mural".into(),
        directory_name: "mural".into(),
    }
}

pub fn png_payload(bytes: &[u8]) -> ImagePayload {
    ImagePayload::from_bytes(MimeType::image_png(), bytes.to_vec())
}

#[derive(Default)]
pub struct MemorySessionStore {
    state: Mutex<Option<PersistedState>>,
}

impl MemorySessionStore {
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    pub fn saved(&self) -> Option<PersistedState> {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStorePort for MemorySessionStore {
    async fn load_state(&self) -> Result<Option<PersistedState>> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn save_state(&self, state: &PersistedState) -> Result<()> {
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryFolderStore {
    pub files: Mutex<BTreeMap<String, ImagePayload>>,
    pub manifest: Mutex<Option<HistoryManifest>>,
    permission: AtomicBool,
}

impl MemoryFolderStore {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
            manifest: Mutex::new(None),
            permission: AtomicBool::new(true),
        }
    }

    pub fn revoke_permission(&self) {
        self.permission.store(false, Ordering::SeqCst);
    }

    fn has_permission(&self) -> bool {
        self.permission.load(Ordering::SeqCst)
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl FolderStorePort for MemoryFolderStore {
    async fn write_image(
        &self,
        _binding: &FolderBinding,
        file_name: &str,
        payload: &ImagePayload,
    ) -> Result<bool> {
        if !self.has_permission() {
            return Ok(false);
        }
        self.files
            .lock()
            .unwrap()
            .insert(file_name.to_string(), payload.clone());
        Ok(true)
    }

    async fn read_image(
        &self,
        _binding: &FolderBinding,
        file_name: &str,
    ) -> Result<Option<ImagePayload>> {
        if !self.has_permission() {
            return Ok(None);
        }
        Ok(self.files.lock().unwrap().get(file_name).cloned())
    }

    async fn delete_image(&self, _binding: &FolderBinding, file_name: &str) -> Result<()> {
        if self.has_permission() {
            self.files.lock().unwrap().remove(file_name);
        }
        Ok(())
    }

    async fn read_manifest(&self, _binding: &FolderBinding) -> Result<Option<HistoryManifest>> {
        if !self.has_permission() {
            return Ok(None);
        }
        Ok(self
            .manifest
            .lock()
            .unwrap()
            .clone()
            .filter(HistoryManifest::is_current))
    }

    async fn write_manifest(
        &self,
        _binding: &FolderBinding,
        manifest: &HistoryManifest,
    ) -> Result<bool> {
        if !self.has_permission() {
            return Ok(false);
        }
        *self.manifest.lock().unwrap() = Some(manifest.clone());
        Ok(true)
    }

    async fn ensure_permission(&self, _binding: &FolderBinding) -> Result<bool> {
        Ok(self.has_permission())
    }
}

#[derive(Default)]
pub struct MemoryBindingRepository {
    binding: Mutex<Option<FolderBinding>>,
}

impl MemoryBindingRepository {
    pub fn with_binding(binding: FolderBinding) -> Self {
        Self {
            binding: Mutex::new(Some(binding)),
        }
    }
}

#[async_trait]
impl BindingRepositoryPort for MemoryBindingRepository {
    async fn load(&self) -> Result<Option<FolderBinding>> {
        Ok(self.binding.lock().unwrap().clone())
    }

    async fn save(&self, binding: &FolderBinding) -> Result<()> {
        *self.binding.lock().unwrap() = Some(binding.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.binding.lock().unwrap() = None;
        Ok(())
    }
}

pub struct StaticFolderPicker {
    pub choice: Option<FolderBinding>,
}

#[async_trait]
impl FolderPickerPort for StaticFolderPicker {
    async fn pick_directory(&self) -> Result<Option<FolderBinding>> {
        Ok(self.choice.clone())
    }
}

pub struct FixedClock(pub i64);

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

pub struct StaticMediaProbe(pub Option<MimeType>);

impl MediaProbePort for StaticMediaProbe {
    fn detect_mime(&self, _bytes: &[u8]) -> Option<MimeType> {
        self.0.clone()
    }
}

/// Generation stub resolving to a fixed outcome.
pub struct StubGeneration {
    pub outcome: Result<GenerationResult, GenerationError>,
    pub credits: Result<CreditsSummary, GenerationError>,
}

impl StubGeneration {
    pub fn succeeding(payload: ImagePayload) -> Self {
        Self {
            outcome: Ok(GenerationResult {
                payload,
                duration_ms: 1200,
                cost: 0.04,
                model_id: "mural-paint-2".into(),
            }),
            credits: Ok(CreditsSummary {
                remaining_credits: 10.0,
            }),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            credits: Err(error.clone()),
            outcome: Err(error),
        }
    }
}

#[async_trait]
impl GenerationPort for StubGeneration {
    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        self.outcome.clone()
    }

    async fn query_credits(&self) -> Result<CreditsSummary, GenerationError> {
        self.credits.clone()
    }
}

/// Generation stub that never resolves; used to exercise cancellation.
pub struct PendingGeneration;

#[async_trait]
impl GenerationPort for PendingGeneration {
    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        std::future::pending().await
    }

    async fn query_credits(&self) -> Result<CreditsSummary, GenerationError> {
        std::future::pending().await
    }
}
