//! Application state snapshot DTOs and migrations.
//!
//! The snapshot is stored as one flat JSON object with a `version` key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use boardroom_core::advisor::{Advisor, AdvisorMemory, Personality};
use boardroom_core::document::{AnalysisResult, DocumentMetadata, FileKind};
use boardroom_core::meeting::{AdvisorAttribution, MeetingRecord, Message, MessageKind};
use boardroom_core::state::AppState;
use boardroom_core::user::UserProfile;

/// Version assumed for stored objects that carry no `version` key.
pub const LEGACY_SNAPSHOT_VERSION: &str = "1.0.0";

// ============================================================================
// Nested DTOs shared by all snapshot versions
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileKindDTO {
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDTO {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub extracted_entities: Vec<String>,
    #[serde(default)]
    pub suggested_advisors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityDTO {
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub approach: String,
    /// Missing on advisors written by early builds.
    #[serde(default)]
    pub tone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorMemoryDTO {
    #[serde(default)]
    pub conversations: Vec<String>,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorDTO {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub is_host: bool,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    pub personality: PersonalityDTO,
    #[serde(default)]
    pub custom_prompt: String,
    #[serde(default)]
    pub specialty_documents: Vec<String>,
    #[serde(default)]
    pub memory: AdvisorMemoryDTO,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDTO {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_avatar: Option<String>,
}

/// Document metadata as stored in the 1.0.0 snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentV1_0 {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub upload_date: DateTime<Utc>,
    #[serde(default)]
    pub analyzed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisDTO>,
    pub file_type: FileKindDTO,
}

/// Document metadata as stored in the 1.1.0 snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentV1_1 {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub upload_date: DateTime<Utc>,
    #[serde(default)]
    pub analyzed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisDTO>,
    pub file_kind: FileKindDTO,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecordV1_0 {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<MessageDTO>,
    #[serde(default)]
    pub advisors: Vec<AdvisorDTO>,
    #[serde(default)]
    pub documents: Vec<DocumentV1_0>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecordV1_1 {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<MessageDTO>,
    #[serde(default)]
    pub advisors: Vec<AdvisorDTO>,
    #[serde(default)]
    pub documents: Vec<DocumentV1_1>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileV1_0 {
    pub name: String,
    pub email: String,
    pub subscription: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileV1_1 {
    pub name: String,
    pub email: String,
    pub subscription_tier: String,
}

// ============================================================================
// Versioned snapshots
// ============================================================================

/// Snapshot V1.0.0: the shape written by the first browser build.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct SnapshotV1_0_0 {
    #[serde(default)]
    pub documents: Vec<DocumentV1_0>,
    #[serde(default)]
    pub selected_advisors: Vec<AdvisorDTO>,
    #[serde(default)]
    pub active_conversations: Vec<MeetingRecordV1_0>,
    pub user_profile: Option<UserProfileV1_0>,
}

/// Snapshot V1.1.0: `fileType` renamed to `fileKind`, `subscription` renamed
/// to `subscriptionTier`.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct SnapshotV1_1_0 {
    #[serde(default)]
    pub documents: Vec<DocumentV1_1>,
    #[serde(default)]
    pub selected_advisors: Vec<AdvisorDTO>,
    #[serde(default)]
    pub active_conversations: Vec<MeetingRecordV1_1>,
    #[serde(default)]
    pub user_profile: UserProfileV1_1,
}

/// Type alias for the latest snapshot version.
pub type SnapshotDTO = SnapshotV1_1_0;

// ============================================================================
// Migration implementations
// ============================================================================

impl From<DocumentV1_0> for DocumentV1_1 {
    fn from(doc: DocumentV1_0) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            mime_type: doc.mime_type,
            size: doc.size,
            upload_date: doc.upload_date,
            analyzed: doc.analyzed,
            analysis: doc.analysis,
            file_kind: doc.file_type,
        }
    }
}

impl From<MeetingRecordV1_0> for MeetingRecordV1_1 {
    fn from(record: MeetingRecordV1_0) -> Self {
        Self {
            id: record.id,
            start_time: record.start_time,
            end_time: record.end_time,
            messages: record.messages,
            advisors: record.advisors,
            documents: record.documents.into_iter().map(Into::into).collect(),
        }
    }
}

/// Migration from SnapshotV1_0_0 to SnapshotV1_1_0.
/// A missing profile becomes the default profile.
impl MigratesTo<SnapshotV1_1_0> for SnapshotV1_0_0 {
    fn migrate(self) -> SnapshotV1_1_0 {
        let user_profile = match self.user_profile {
            Some(profile) => UserProfileV1_1 {
                name: profile.name,
                email: profile.email,
                subscription_tier: profile.subscription,
            },
            None => UserProfileV1_1::default(),
        };

        SnapshotV1_1_0 {
            documents: self.documents.into_iter().map(Into::into).collect(),
            selected_advisors: self.selected_advisors,
            active_conversations: self
                .active_conversations
                .into_iter()
                .map(Into::into)
                .collect(),
            user_profile,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<FileKindDTO> for FileKind {
    fn from(dto: FileKindDTO) -> Self {
        FileKind {
            ext: dto.ext,
            icon: dto.icon,
            color: dto.color,
        }
    }
}

impl From<&FileKind> for FileKindDTO {
    fn from(kind: &FileKind) -> Self {
        FileKindDTO {
            ext: kind.ext.clone(),
            icon: kind.icon.clone(),
            color: kind.color.clone(),
        }
    }
}

impl From<AnalysisDTO> for AnalysisResult {
    fn from(dto: AnalysisDTO) -> Self {
        AnalysisResult {
            summary: dto.summary,
            key_points: dto.key_points,
            sentiment: dto.sentiment,
            relevance_score: dto.relevance_score,
            extracted_entities: dto.extracted_entities,
            suggested_advisors: dto.suggested_advisors,
        }
    }
}

impl From<&AnalysisResult> for AnalysisDTO {
    fn from(analysis: &AnalysisResult) -> Self {
        AnalysisDTO {
            summary: analysis.summary.clone(),
            key_points: analysis.key_points.clone(),
            sentiment: analysis.sentiment.clone(),
            relevance_score: analysis.relevance_score,
            extracted_entities: analysis.extracted_entities.clone(),
            suggested_advisors: analysis.suggested_advisors.clone(),
        }
    }
}

impl From<DocumentV1_1> for DocumentMetadata {
    fn from(dto: DocumentV1_1) -> Self {
        DocumentMetadata {
            id: dto.id,
            name: dto.name,
            mime_type: dto.mime_type,
            size_bytes: dto.size,
            uploaded_at: dto.upload_date,
            analyzed: dto.analyzed,
            analysis: dto.analysis.map(Into::into),
            file_kind: dto.file_kind.into(),
        }
    }
}

impl From<&DocumentMetadata> for DocumentV1_1 {
    fn from(doc: &DocumentMetadata) -> Self {
        DocumentV1_1 {
            id: doc.id.clone(),
            name: doc.name.clone(),
            mime_type: doc.mime_type.clone(),
            size: doc.size_bytes,
            upload_date: doc.uploaded_at,
            analyzed: doc.analyzed,
            analysis: doc.analysis.as_ref().map(Into::into),
            file_kind: (&doc.file_kind).into(),
        }
    }
}

impl From<AdvisorDTO> for Advisor {
    fn from(dto: AdvisorDTO) -> Self {
        Advisor {
            id: dto.id,
            name: dto.name,
            role: dto.role,
            avatar: dto.avatar,
            is_host: dto.is_host,
            experience: dto.experience,
            expertise: dto.expertise,
            personality: Personality {
                traits: dto.personality.traits,
                approach: dto.personality.approach,
                tone: dto.personality.tone,
            },
            custom_prompt: dto.custom_prompt,
            specialty_documents: dto.specialty_documents,
            memory: AdvisorMemory {
                conversations: dto.memory.conversations,
                key_insights: dto.memory.key_insights,
                action_items: dto.memory.action_items,
            },
        }
    }
}

impl From<&Advisor> for AdvisorDTO {
    fn from(advisor: &Advisor) -> Self {
        AdvisorDTO {
            id: advisor.id.clone(),
            name: advisor.name.clone(),
            role: advisor.role.clone(),
            avatar: advisor.avatar.clone(),
            is_host: advisor.is_host,
            experience: advisor.experience.clone(),
            expertise: advisor.expertise.clone(),
            personality: PersonalityDTO {
                traits: advisor.personality.traits.clone(),
                approach: advisor.personality.approach.clone(),
                tone: advisor.personality.tone.clone(),
            },
            custom_prompt: advisor.custom_prompt.clone(),
            specialty_documents: advisor.specialty_documents.clone(),
            memory: AdvisorMemoryDTO {
                conversations: advisor.memory.conversations.clone(),
                key_insights: advisor.memory.key_insights.clone(),
                action_items: advisor.memory.action_items.clone(),
            },
        }
    }
}

impl From<MessageDTO> for Message {
    fn from(dto: MessageDTO) -> Self {
        // Attribution requires at least the advisor id.
        let attribution = dto.advisor_id.map(|advisor_id| AdvisorAttribution {
            advisor_id,
            name: dto.advisor_name.unwrap_or_default(),
            role: dto.advisor_role.unwrap_or_default(),
            avatar: dto.advisor_avatar.unwrap_or_default(),
        });

        Message {
            id: dto.id,
            kind: dto.kind,
            content: dto.content,
            timestamp: dto.timestamp,
            attribution,
        }
    }
}

impl From<&Message> for MessageDTO {
    fn from(message: &Message) -> Self {
        let attribution = message.attribution.as_ref();
        MessageDTO {
            id: message.id.clone(),
            kind: message.kind,
            content: message.content.clone(),
            timestamp: message.timestamp,
            advisor_id: attribution.map(|a| a.advisor_id.clone()),
            advisor_name: attribution.map(|a| a.name.clone()),
            advisor_role: attribution.map(|a| a.role.clone()),
            advisor_avatar: attribution.map(|a| a.avatar.clone()),
        }
    }
}

impl From<MeetingRecordV1_1> for MeetingRecord {
    fn from(dto: MeetingRecordV1_1) -> Self {
        MeetingRecord {
            id: dto.id,
            start_time: dto.start_time,
            end_time: dto.end_time,
            messages: dto.messages.into_iter().map(Into::into).collect(),
            advisors: dto.advisors.into_iter().map(Into::into).collect(),
            documents: dto.documents.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&MeetingRecord> for MeetingRecordV1_1 {
    fn from(record: &MeetingRecord) -> Self {
        MeetingRecordV1_1 {
            id: record.id.clone(),
            start_time: record.start_time,
            end_time: record.end_time,
            messages: record.messages.iter().map(Into::into).collect(),
            advisors: record.advisors.iter().map(Into::into).collect(),
            documents: record.documents.iter().map(Into::into).collect(),
        }
    }
}

impl From<&UserProfile> for UserProfileV1_1 {
    fn from(profile: &UserProfile) -> Self {
        UserProfileV1_1 {
            name: profile.name.clone(),
            email: profile.email.clone(),
            subscription_tier: profile.subscription_tier.clone(),
        }
    }
}

impl Default for UserProfileV1_1 {
    fn default() -> Self {
        (&UserProfile::default()).into()
    }
}

/// Convert SnapshotV1_1_0 DTO to domain model.
///
/// Advisor defaulting is not applied here; the snapshot store normalizes
/// after loading.
impl IntoDomain<AppState> for SnapshotV1_1_0 {
    fn into_domain(self) -> AppState {
        AppState {
            documents: self.documents.into_iter().map(Into::into).collect(),
            selected_advisors: self.selected_advisors.into_iter().map(Into::into).collect(),
            active_conversations: self
                .active_conversations
                .into_iter()
                .map(Into::into)
                .collect(),
            user_profile: UserProfile {
                name: self.user_profile.name,
                email: self.user_profile.email,
                subscription_tier: self.user_profile.subscription_tier,
            },
        }
    }
}

/// Convert domain model to SnapshotV1_1_0 DTO for persistence.
impl FromDomain<AppState> for SnapshotV1_1_0 {
    fn from_domain(state: AppState) -> Self {
        SnapshotV1_1_0 {
            documents: state.documents.iter().map(Into::into).collect(),
            selected_advisors: state.selected_advisors.iter().map(Into::into).collect(),
            active_conversations: state.active_conversations.iter().map(Into::into).collect(),
            user_profile: (&state.user_profile).into(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Tags a stored object with the legacy version when it has none.
///
/// Snapshots written before versioning was introduced are plain objects.
pub fn ensure_version_tag(value: &mut serde_json::Value) {
    if let Some(object) = value.as_object_mut() {
        object
            .entry("version")
            .or_insert_with(|| serde_json::Value::String(LEGACY_SNAPSHOT_VERSION.to_string()));
    }
}

/// Creates and configures a Migrator instance for snapshot entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Renames `fileType` to `fileKind` and `subscription` to `subscriptionTier`
/// - V1.1.0 → AppState: Converts DTO to domain model
///
/// # Example
///
/// ```ignore
/// let migrator = create_snapshot_migrator();
/// let state: AppState = migrator.load_flat_from("snapshot", json_value)?;
/// ```
pub fn create_snapshot_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    // Register migration path: V1.0.0 -> V1.1.0 -> AppState
    let snapshot_path = version_migrate::Migrator::define("snapshot")
        .from::<SnapshotV1_0_0>()
        .step::<SnapshotV1_1_0>()
        .into_with_save::<AppState>();

    migrator
        .register(snapshot_path)
        .expect("Failed to register snapshot migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_core::advisor::get_default_advisors;
    use serde_json::json;

    fn legacy_snapshot() -> serde_json::Value {
        json!({
            "documents": [{
                "id": "doc_1_abc",
                "name": "plan.pdf",
                "type": "application/pdf",
                "size": 2048,
                "uploadDate": "2024-03-01T10:00:00.000Z",
                "analyzed": false,
                "fileType": { "ext": "pdf", "icon": "📄", "color": "red" }
            }],
            "selectedAdvisors": [{
                "id": "custom-1700000000000",
                "name": "Ada",
                "role": "CTO",
                "avatar": "🤖",
                "isHost": false,
                "experience": "",
                "expertise": [],
                "personality": { "traits": [], "approach": "Pragmatic" },
                "customPrompt": "You are a CTO.",
                "specialtyDocuments": []
            }],
            "activeConversations": [],
            "userProfile": {
                "name": "Grace",
                "email": "grace@example.com",
                "subscription": "Professional"
            }
        })
    }

    #[test]
    fn test_legacy_snapshot_migrates_to_domain() {
        let mut value = legacy_snapshot();
        ensure_version_tag(&mut value);
        assert_eq!(value["version"], "1.0.0");

        let migrator = create_snapshot_migrator();
        let state: AppState = migrator.load_flat_from("snapshot", value).unwrap();

        assert_eq!(state.documents.len(), 1);
        assert_eq!(state.documents[0].mime_type, "application/pdf");
        assert_eq!(state.documents[0].size_bytes, 2048);
        assert_eq!(state.documents[0].file_kind.ext, "pdf");
        assert_eq!(state.selected_advisors[0].personality.tone, "");
        assert_eq!(state.selected_advisors[0].memory, AdvisorMemory::default());
        assert_eq!(state.user_profile.subscription_tier, "Professional");
    }

    #[test]
    fn test_ensure_version_tag_keeps_existing_version() {
        let mut value = json!({ "version": "1.1.0" });
        ensure_version_tag(&mut value);
        assert_eq!(value["version"], "1.1.0");
    }

    #[test]
    fn test_saved_snapshot_uses_current_shape() {
        let state = AppState::default();
        let migrator = create_snapshot_migrator();
        let json = migrator.save_domain_flat("snapshot", state.clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], "1.1.0");
        assert_eq!(value["userProfile"]["subscriptionTier"], "Professional");
        assert_eq!(
            value["selectedAdvisors"].as_array().unwrap().len(),
            get_default_advisors().len()
        );

        let loaded: AppState = migrator.load_flat_from("snapshot", value).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_advisor_message_fields_are_flat() {
        let host = boardroom_core::advisor::default_host();
        let message = Message::advisor(&host, "Welcome.");
        let dto = MessageDTO::from(&message);
        let value = serde_json::to_value(&dto).unwrap();

        assert_eq!(value["type"], "advisor");
        assert_eq!(value["advisorId"], "host-001");
        assert_eq!(value["advisorAvatar"], "🎯");
        assert_eq!(Message::from(dto), message);
    }
}
