//! Uploaded-file entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::FileType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub file_key: String,
    pub file_url: String,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_type: String,
    pub owner_user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_file::Entity")]
    PostFile,
}

impl Related<super::post_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostFile.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_file::Relation::Post.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_file::Relation::File.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for quill_core::domain::StoredFile {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            file_key: model.file_key,
            file_url: model.file_url,
            original_name: model.original_name,
            mime_type: model.mime_type,
            file_size: model.file_size,
            file_type: FileType::from(model.file_type.as_str()),
            owner_user_id: model.owner_user_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<quill_core::domain::StoredFile> for ActiveModel {
    fn from(file: quill_core::domain::StoredFile) -> Self {
        Self {
            id: Set(file.id),
            file_key: Set(file.file_key),
            file_url: Set(file.file_url),
            original_name: Set(file.original_name),
            mime_type: Set(file.mime_type),
            file_size: Set(file.file_size),
            file_type: Set(file.file_type.as_str().to_string()),
            owner_user_id: Set(file.owner_user_id),
            created_at: Set(file.created_at.into()),
        }
    }
}
