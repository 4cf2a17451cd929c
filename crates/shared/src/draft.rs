//! The briefing draft and the schema describing each of its fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("field `{0}` holds a set of labels, not a single value")]
    NotScalar(&'static str),
    #[error("field `{0}` holds a single value, not a set of labels")]
    NotSet(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Draft {
    pub contact_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,

    pub project_type: String,
    pub number_of_websites: String,
    pub has_existing_website: String,
    pub existing_website_url: String,

    pub primary_goal: String,
    pub secondary_goals: Vec<String>,
    pub target_audience: String,
    pub unique_selling_points: String,

    pub design_style: String,
    pub color_preferences: String,
    pub competitor_websites: String,
    pub brand_assets: String,

    pub required_features: Vec<String>,
    pub other_features: String,
    pub integrations: String,

    pub content_ready: String,
    pub content_help: Vec<String>,
    pub number_of_pages: String,

    pub timeline: String,
    pub budget: String,

    pub additional_info: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ContactName,
    CompanyName,
    Email,
    Phone,
    ProjectType,
    NumberOfWebsites,
    HasExistingWebsite,
    ExistingWebsiteUrl,
    PrimaryGoal,
    SecondaryGoals,
    TargetAudience,
    UniqueSellingPoints,
    DesignStyle,
    ColorPreferences,
    CompetitorWebsites,
    BrandAssets,
    RequiredFeatures,
    OtherFeatures,
    Integrations,
    ContentReady,
    ContentHelp,
    NumberOfPages,
    Timeline,
    Budget,
    AdditionalInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Scalar(&'a str),
    Set(&'a [String]),
}

impl FieldValue<'_> {
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Scalar(value) => value.trim().is_empty(),
            FieldValue::Set(values) => values.is_empty(),
        }
    }
}

impl Field {
    pub const ALL: [Field; 25] = [
        Field::ContactName,
        Field::CompanyName,
        Field::Email,
        Field::Phone,
        Field::ProjectType,
        Field::NumberOfWebsites,
        Field::HasExistingWebsite,
        Field::ExistingWebsiteUrl,
        Field::PrimaryGoal,
        Field::SecondaryGoals,
        Field::TargetAudience,
        Field::UniqueSellingPoints,
        Field::DesignStyle,
        Field::ColorPreferences,
        Field::CompetitorWebsites,
        Field::BrandAssets,
        Field::RequiredFeatures,
        Field::OtherFeatures,
        Field::Integrations,
        Field::ContentReady,
        Field::ContentHelp,
        Field::NumberOfPages,
        Field::Timeline,
        Field::Budget,
        Field::AdditionalInfo,
    ];

    /// JSON key used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Field::ContactName => "contactName",
            Field::CompanyName => "companyName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::ProjectType => "projectType",
            Field::NumberOfWebsites => "numberOfWebsites",
            Field::HasExistingWebsite => "hasExistingWebsite",
            Field::ExistingWebsiteUrl => "existingWebsiteUrl",
            Field::PrimaryGoal => "primaryGoal",
            Field::SecondaryGoals => "secondaryGoals",
            Field::TargetAudience => "targetAudience",
            Field::UniqueSellingPoints => "uniqueSellingPoints",
            Field::DesignStyle => "designStyle",
            Field::ColorPreferences => "colorPreferences",
            Field::CompetitorWebsites => "competitorWebsites",
            Field::BrandAssets => "brandAssets",
            Field::RequiredFeatures => "requiredFeatures",
            Field::OtherFeatures => "otherFeatures",
            Field::Integrations => "integrations",
            Field::ContentReady => "contentReady",
            Field::ContentHelp => "contentHelp",
            Field::NumberOfPages => "numberOfPages",
            Field::Timeline => "timeline",
            Field::Budget => "budget",
            Field::AdditionalInfo => "additionalInfo",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::ContactName => "Your Name",
            Field::CompanyName => "Company Name",
            Field::Email => "Email Address",
            Field::Phone => "Phone Number",
            Field::ProjectType => "What type of project is this?",
            Field::NumberOfWebsites => "How many websites is this project for?",
            Field::HasExistingWebsite => "Do you have an existing website?",
            Field::ExistingWebsiteUrl => "Current Website URL(s)",
            Field::PrimaryGoal => "What is the primary goal of your website?",
            Field::SecondaryGoals => "Secondary goals",
            Field::TargetAudience => "Who is your target audience?",
            Field::UniqueSellingPoints => "What makes you unique?",
            Field::DesignStyle => "Preferred design style",
            Field::ColorPreferences => "Colour preferences",
            Field::CompetitorWebsites => "Websites you like",
            Field::BrandAssets => "Do you have brand assets?",
            Field::RequiredFeatures => "Required features",
            Field::OtherFeatures => "Other features",
            Field::Integrations => "Integrations",
            Field::ContentReady => "Is your content ready?",
            Field::ContentHelp => "What content help do you need?",
            Field::NumberOfPages => "Estimated number of pages",
            Field::Timeline => "When do you need the website?",
            Field::Budget => "What is your budget?",
            Field::AdditionalInfo => "Anything else we should know?",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::SecondaryGoals | Field::RequiredFeatures | Field::ContentHelp => FieldKind::Set,
            _ => FieldKind::Scalar,
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Field::ContactName
                | Field::CompanyName
                | Field::Email
                | Field::PrimaryGoal
                | Field::TargetAudience
                | Field::DesignStyle
                | Field::Timeline
                | Field::Budget
        )
    }

    /// Whether the field is relevant given the current values of its siblings.
    pub fn is_visible(self, draft: &Draft) -> bool {
        match self {
            Field::ExistingWebsiteUrl => draft.has_existing_site(),
            Field::ContentHelp => draft.needs_content_help(),
            _ => true,
        }
    }
}

impl Draft {
    /// Initial state of a new form session.
    pub fn new() -> Self {
        Self {
            number_of_websites: "1".into(),
            ..Self::default()
        }
    }

    pub fn has_existing_site(&self) -> bool {
        self.has_existing_website == "yes"
    }

    pub fn needs_content_help(&self) -> bool {
        matches!(self.content_ready.as_str(), "partial" | "need-help")
    }

    pub fn has_required_identity(&self) -> bool {
        [&self.contact_name, &self.company_name, &self.email]
            .iter()
            .all(|value| !value.trim().is_empty())
    }

    pub fn get(&self, field: Field) -> FieldValue<'_> {
        match self.set_ref(field) {
            Some(values) => FieldValue::Set(values),
            None => FieldValue::Scalar(self.scalar_ref(field).unwrap_or_default()),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), DraftError> {
        let slot = self
            .scalar_mut(field)
            .ok_or(DraftError::NotScalar(field.key()))?;
        *slot = value.into();
        Ok(())
    }

    /// Adds `label` when absent and removes it when present. Returns whether
    /// the label is selected afterwards.
    pub fn toggle(&mut self, field: Field, label: &str) -> Result<bool, DraftError> {
        let values = self.set_mut(field).ok_or(DraftError::NotSet(field.key()))?;
        if let Some(index) = values.iter().position(|value| value == label) {
            values.remove(index);
            Ok(false)
        } else {
            values.push(label.to_string());
            Ok(true)
        }
    }

    /// Required fields among `fields` that are currently visible and blank.
    pub fn missing_required(&self, fields: &[Field]) -> Vec<Field> {
        fields
            .iter()
            .copied()
            .filter(|field| field.is_required() && field.is_visible(self))
            .filter(|field| self.get(*field).is_blank())
            .collect()
    }

    fn scalar_ref(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::ContactName => &self.contact_name,
            Field::CompanyName => &self.company_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::ProjectType => &self.project_type,
            Field::NumberOfWebsites => &self.number_of_websites,
            Field::HasExistingWebsite => &self.has_existing_website,
            Field::ExistingWebsiteUrl => &self.existing_website_url,
            Field::PrimaryGoal => &self.primary_goal,
            Field::TargetAudience => &self.target_audience,
            Field::UniqueSellingPoints => &self.unique_selling_points,
            Field::DesignStyle => &self.design_style,
            Field::ColorPreferences => &self.color_preferences,
            Field::CompetitorWebsites => &self.competitor_websites,
            Field::BrandAssets => &self.brand_assets,
            Field::OtherFeatures => &self.other_features,
            Field::Integrations => &self.integrations,
            Field::ContentReady => &self.content_ready,
            Field::NumberOfPages => &self.number_of_pages,
            Field::Timeline => &self.timeline,
            Field::Budget => &self.budget,
            Field::AdditionalInfo => &self.additional_info,
            Field::SecondaryGoals | Field::RequiredFeatures | Field::ContentHelp => return None,
        };
        Some(value.as_str())
    }

    fn scalar_mut(&mut self, field: Field) -> Option<&mut String> {
        let value = match field {
            Field::ContactName => &mut self.contact_name,
            Field::CompanyName => &mut self.company_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::ProjectType => &mut self.project_type,
            Field::NumberOfWebsites => &mut self.number_of_websites,
            Field::HasExistingWebsite => &mut self.has_existing_website,
            Field::ExistingWebsiteUrl => &mut self.existing_website_url,
            Field::PrimaryGoal => &mut self.primary_goal,
            Field::TargetAudience => &mut self.target_audience,
            Field::UniqueSellingPoints => &mut self.unique_selling_points,
            Field::DesignStyle => &mut self.design_style,
            Field::ColorPreferences => &mut self.color_preferences,
            Field::CompetitorWebsites => &mut self.competitor_websites,
            Field::BrandAssets => &mut self.brand_assets,
            Field::OtherFeatures => &mut self.other_features,
            Field::Integrations => &mut self.integrations,
            Field::ContentReady => &mut self.content_ready,
            Field::NumberOfPages => &mut self.number_of_pages,
            Field::Timeline => &mut self.timeline,
            Field::Budget => &mut self.budget,
            Field::AdditionalInfo => &mut self.additional_info,
            Field::SecondaryGoals | Field::RequiredFeatures | Field::ContentHelp => return None,
        };
        Some(value)
    }

    fn set_ref(&self, field: Field) -> Option<&[String]> {
        match field {
            Field::SecondaryGoals => Some(&self.secondary_goals),
            Field::RequiredFeatures => Some(&self.required_features),
            Field::ContentHelp => Some(&self.content_help),
            _ => None,
        }
    }

    fn set_mut(&mut self, field: Field) -> Option<&mut Vec<String>> {
        match field {
            Field::SecondaryGoals => Some(&mut self.secondary_goals),
            Field::RequiredFeatures => Some(&mut self.required_features),
            Field::ContentHelp => Some(&mut self.content_help),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/draft_tests.rs"]
mod tests;
