use crate::draft::Field;

/// Ordered code → display label table. Unknown codes render as themselves.
#[derive(Debug, Clone, Copy)]
pub struct LabelDictionary {
    entries: &'static [(&'static str, &'static str)],
}

impl LabelDictionary {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn get(&self, code: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, label)| *label)
    }

    pub fn label<'a>(&self, code: &'a str) -> &'a str {
        self.get(code).unwrap_or(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn options(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

pub const PROJECT_TYPES: LabelDictionary = LabelDictionary::new(&[
    ("new-website", "Brand New Website"),
    ("redesign", "Website Redesign"),
    ("revamp", "Refresh / Revamp"),
    ("ecommerce", "E-commerce Store"),
]);

pub const PRIMARY_GOALS: LabelDictionary = LabelDictionary::new(&[
    ("generate-leads", "Generate leads / enquiries"),
    ("sell-products", "Sell products online"),
    ("brand-awareness", "Build brand awareness"),
    ("provide-information", "Provide information / resources"),
    ("booking-appointments", "Enable bookings / appointments"),
    ("portfolio", "Showcase portfolio / work"),
    ("other", "Other"),
]);

pub const DESIGN_STYLES: LabelDictionary = LabelDictionary::new(&[
    ("minimal", "Minimal & Clean"),
    ("modern", "Modern & Bold"),
    ("corporate", "Corporate & Professional"),
    ("creative", "Creative & Artistic"),
    ("luxury", "Luxury & Elegant"),
    ("playful", "Playful & Fun"),
]);

pub const BRAND_ASSETS: LabelDictionary = LabelDictionary::new(&[
    ("full-brand", "Full brand guidelines, logo, colours, fonts"),
    ("logo-only", "Just a logo"),
    ("need-branding", "Needs branding as well"),
    ("refresh-needed", "Existing brand needs refreshing"),
]);

pub const TIMELINES: LabelDictionary = LabelDictionary::new(&[
    ("asap", "ASAP"),
    ("1-month", "Within 1 month"),
    ("2-3-months", "2-3 months"),
    ("3-6-months", "3-6 months"),
    ("flexible", "Flexible / No rush"),
    ("specific-date", "Specific date"),
]);

pub const BUDGETS: LabelDictionary = LabelDictionary::new(&[
    ("under-2k", "Under £2,000"),
    ("2k-5k", "£2,000 - £5,000"),
    ("5k-10k", "£5,000 - £10,000"),
    ("10k-20k", "£10,000 - £20,000"),
    ("20k+", "£20,000+"),
    ("not-sure", "Not sure / Flexible"),
]);

pub const CONTENT_READINESS: LabelDictionary = LabelDictionary::new(&[
    ("ready", "Yes, all ready"),
    ("partial", "Partially ready"),
    ("need-help", "Needs help"),
]);

pub const EXISTING_WEBSITE: LabelDictionary =
    LabelDictionary::new(&[("yes", "Yes"), ("no", "No")]);

pub const WEBSITE_COUNTS: LabelDictionary =
    LabelDictionary::new(&[("1", "1"), ("2", "2"), ("3", "3"), ("4+", "4+")]);

pub const PAGE_COUNTS: LabelDictionary = LabelDictionary::new(&[
    ("1-5", "1-5 pages (simple site)"),
    ("6-10", "6-10 pages"),
    ("11-20", "11-20 pages"),
    ("20+", "20+ pages"),
    ("not-sure", "Not sure yet"),
]);

pub const SECONDARY_GOAL_OPTIONS: &[&str] = &[
    "Increase organic traffic (SEO)",
    "Build email list",
    "Improve user experience",
    "Mobile-first experience",
    "Integrate with CRM",
    "Social media integration",
    "Blog / Content marketing",
    "Customer support / FAQ",
];

pub const FEATURE_OPTIONS: &[&str] = &[
    "Contact form",
    "Blog / News section",
    "E-commerce / Shop",
    "Booking system",
    "User accounts / Login",
    "Newsletter signup",
    "Live chat",
    "Video backgrounds",
    "Animations / Interactions",
    "Multi-language support",
    "CMS (content management)",
    "Analytics integration",
];

pub const CONTENT_HELP_OPTIONS: &[&str] = &[
    "Copywriting",
    "Photography",
    "Video production",
    "Illustrations / Graphics",
];

/// The fixed choices a field offers, if any. Free-text fields have none.
#[derive(Debug, Clone, Copy)]
pub enum Choices {
    Coded(LabelDictionary),
    Labels(&'static [&'static str]),
}

pub fn choices_for(field: Field) -> Option<Choices> {
    let choices = match field {
        Field::ProjectType => Choices::Coded(PROJECT_TYPES),
        Field::NumberOfWebsites => Choices::Coded(WEBSITE_COUNTS),
        Field::HasExistingWebsite => Choices::Coded(EXISTING_WEBSITE),
        Field::PrimaryGoal => Choices::Coded(PRIMARY_GOALS),
        Field::SecondaryGoals => Choices::Labels(SECONDARY_GOAL_OPTIONS),
        Field::DesignStyle => Choices::Coded(DESIGN_STYLES),
        Field::BrandAssets => Choices::Coded(BRAND_ASSETS),
        Field::RequiredFeatures => Choices::Labels(FEATURE_OPTIONS),
        Field::ContentReady => Choices::Coded(CONTENT_READINESS),
        Field::ContentHelp => Choices::Labels(CONTENT_HELP_OPTIONS),
        Field::NumberOfPages => Choices::Coded(PAGE_COUNTS),
        Field::Timeline => Choices::Coded(TIMELINES),
        Field::Budget => Choices::Coded(BUDGETS),
        _ => return None,
    };
    Some(choices)
}
