//! Component schema registry: the closed set of component kinds, their
//! property records, default values, and palette metadata.
//!
//! Property records deserialize from partial JSON bags; any key the user
//! never set falls back to the record's `Default` value at resolve time.
//! Stored bags are never rewritten, so a partially-edited component keeps
//! only the keys the user actually touched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of component kinds. Adding a kind means adding a variant
/// here, a property record, a `default_props` arm, a catalog entry, and a
/// renderer arm; the compiler flags every site that needs updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Hero,
    Navbar,
    Features,
    Cta,
    Footer,
    Text,
    Image,
    ContactForm,
    Testimonials,
    Pricing,
    Gallery,
    Video,
    Faq,
    Cards,
    Team,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 15] = [
        ComponentKind::Hero,
        ComponentKind::Navbar,
        ComponentKind::Features,
        ComponentKind::Cta,
        ComponentKind::Footer,
        ComponentKind::Text,
        ComponentKind::Image,
        ComponentKind::ContactForm,
        ComponentKind::Testimonials,
        ComponentKind::Pricing,
        ComponentKind::Gallery,
        ComponentKind::Video,
        ComponentKind::Faq,
        ComponentKind::Cards,
        ComponentKind::Team,
    ];

    /// The stored wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Hero => "hero",
            ComponentKind::Navbar => "navbar",
            ComponentKind::Features => "features",
            ComponentKind::Cta => "cta",
            ComponentKind::Footer => "footer",
            ComponentKind::Text => "text",
            ComponentKind::Image => "image",
            ComponentKind::ContactForm => "contact_form",
            ComponentKind::Testimonials => "testimonials",
            ComponentKind::Pricing => "pricing",
            ComponentKind::Gallery => "gallery",
            ComponentKind::Video => "video",
            ComponentKind::Faq => "faq",
            ComponentKind::Cards => "cards",
            ComponentKind::Team => "team",
        }
    }

    /// Resolve a stored tag. Stored layouts may carry tags outside the
    /// registry (corrupted or future components); those resolve to `None`
    /// and render as a placeholder rather than failing the page.
    pub fn parse(tag: &str) -> Option<ComponentKind> {
        ComponentKind::ALL.iter().copied().find(|k| k.as_str() == tag)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One component instance in a layout document.
///
/// The kind tag is kept as the raw stored string so that a document
/// containing an unrecognized tag still loads; `kind()` resolves it
/// against the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub props: Value,
}

impl Component {
    /// New instance with an empty property bag; every key resolves to its
    /// default at render time.
    pub fn new(kind: ComponentKind, id: impl Into<String>) -> Self {
        Component {
            id: id.into(),
            kind: kind.as_str().to_string(),
            props: Value::Object(Default::default()),
        }
    }

    /// New instance with the kind's full default bag materialized, the way
    /// the editor palette creates components.
    pub fn with_defaults(kind: ComponentKind, id: impl Into<String>) -> Self {
        Component {
            id: id.into(),
            kind: kind.as_str().to_string(),
            props: default_props(kind),
        }
    }

    pub fn kind(&self) -> Option<ComponentKind> {
        ComponentKind::parse(&self.kind)
    }
}

// ---------------------------------------------------------------------------
// Property records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroProps {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_link: String,
    pub bg_color: String,
    pub text_align: String,
}

impl Default for HeroProps {
    fn default() -> Self {
        HeroProps {
            title: "Welcome to Our Website".into(),
            subtitle: "Build amazing things with our platform".into(),
            button_text: "Get Started".into(),
            button_link: "#".into(),
            bg_color: "primary".into(),
            text_align: "center".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavLink {
    pub text: String,
    pub url: String,
}

impl NavLink {
    pub fn new(text: &str, url: &str) -> Self {
        NavLink {
            text: text.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarProps {
    pub brand_name: String,
    pub bg_color: String,
    pub text_color: String,
    pub links: Vec<NavLink>,
}

impl Default for NavbarProps {
    fn default() -> Self {
        NavbarProps {
            brand_name: "MyBrand".into(),
            bg_color: "light".into(),
            text_color: "dark".into(),
            links: vec![
                NavLink::new("Home", "/"),
                NavLink::new("About", "/about"),
                NavLink::new("Contact", "/contact"),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl FeatureItem {
    pub fn new(icon: &str, title: &str, description: &str) -> Self {
        FeatureItem {
            icon: icon.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesProps {
    pub title: String,
    pub items: Vec<FeatureItem>,
}

impl Default for FeaturesProps {
    fn default() -> Self {
        FeaturesProps {
            title: "Our Features".into(),
            items: vec![
                FeatureItem::new("⚡", "Fast", "Lightning fast performance"),
                FeatureItem::new("🔒", "Secure", "Bank-level security"),
                FeatureItem::new("💎", "Premium", "Premium quality"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CtaProps {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_link: String,
    pub bg_color: String,
}

impl Default for CtaProps {
    fn default() -> Self {
        CtaProps {
            title: "Ready to get started?".into(),
            subtitle: "Join thousands of satisfied customers".into(),
            button_text: "Sign Up Now".into(),
            button_link: "#".into(),
            bg_color: "primary".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterProps {
    pub text: String,
    pub bg_color: String,
    pub links: Vec<NavLink>,
}

impl Default for FooterProps {
    fn default() -> Self {
        FooterProps {
            text: "© 2024 MyBrand. All rights reserved.".into(),
            bg_color: "dark".into(),
            links: vec![
                NavLink::new("Privacy", "/privacy"),
                NavLink::new("Terms", "/terms"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextProps {
    pub content: String,
    pub align: String,
    /// Discrete size bucket: "small", "normal" or "large".
    pub size: String,
}

impl Default for TextProps {
    fn default() -> Self {
        TextProps {
            content: "Your text here...".into(),
            align: "left".into(),
            size: "normal".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub width: String,
    pub align: String,
}

impl Default for ImageProps {
    fn default() -> Self {
        ImageProps {
            src: "https://images.unsplash.com/photo-1499951360447-b19be8fe80f5?w=800&h=400&fit=crop"
                .into(),
            alt: "Placeholder image".into(),
            width: "100%".into(),
            align: "center".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
}

impl FormField {
    pub fn new(field_type: &str, label: &str, placeholder: &str, required: bool) -> Self {
        FormField {
            field_type: field_type.into(),
            label: label.into(),
            placeholder: placeholder.into(),
            required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFormProps {
    pub title: String,
    pub subtitle: String,
    pub fields: Vec<FormField>,
    pub button_text: String,
}

impl Default for ContactFormProps {
    fn default() -> Self {
        ContactFormProps {
            title: "Get in Touch".into(),
            subtitle: "We'd love to hear from you".into(),
            fields: vec![
                FormField::new("text", "Name", "Your name", true),
                FormField::new("email", "Email", "your@email.com", true),
                FormField::new("textarea", "Message", "Your message", true),
            ],
            button_text: "Send Message".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub text: String,
    pub avatar: String,
}

impl Testimonial {
    pub fn new(name: &str, role: &str, text: &str, avatar: &str) -> Self {
        Testimonial {
            name: name.into(),
            role: role.into(),
            text: text.into(),
            avatar: avatar.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialsProps {
    pub title: String,
    pub items: Vec<Testimonial>,
}

impl Default for TestimonialsProps {
    fn default() -> Self {
        TestimonialsProps {
            title: "What Our Customers Say".into(),
            items: vec![
                Testimonial::new(
                    "John Doe",
                    "CEO, Company",
                    "Amazing service! Highly recommend.",
                    "👤",
                ),
                Testimonial::new("Jane Smith", "Designer", "Best decision we ever made.", "👤"),
                Testimonial::new(
                    "Bob Johnson",
                    "Developer",
                    "Outstanding quality and support.",
                    "👤",
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    pub period: String,
    pub features: Vec<String>,
    /// Visual emphasis only (border + badge); never affects ordering.
    pub highlighted: bool,
}

impl PricingPlan {
    pub fn new(name: &str, price: &str, period: &str, features: &[&str], highlighted: bool) -> Self {
        PricingPlan {
            name: name.into(),
            price: price.into(),
            period: period.into(),
            features: features.iter().map(|f| f.to_string()).collect(),
            highlighted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingProps {
    pub title: String,
    pub plans: Vec<PricingPlan>,
}

impl Default for PricingProps {
    fn default() -> Self {
        PricingProps {
            title: "Choose Your Plan".into(),
            plans: vec![
                PricingPlan::new(
                    "Basic",
                    "$9",
                    "/month",
                    &["Feature 1", "Feature 2", "Feature 3"],
                    false,
                ),
                PricingPlan::new(
                    "Pro",
                    "$29",
                    "/month",
                    &["All Basic", "Feature 4", "Feature 5", "Priority Support"],
                    true,
                ),
                PricingPlan::new(
                    "Enterprise",
                    "$99",
                    "/month",
                    &["All Pro", "Custom Features", "Dedicated Support"],
                    false,
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
}

impl GalleryImage {
    pub fn new(src: &str, alt: &str) -> Self {
        GalleryImage {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryProps {
    pub title: String,
    pub images: Vec<GalleryImage>,
    /// Columns per row in a 12-unit grid; supported values are 2, 3 and 4.
    /// Out-of-range values are clamped into that range at render time.
    pub columns: u64,
}

impl Default for GalleryProps {
    fn default() -> Self {
        GalleryProps {
            title: "Gallery".into(),
            images: vec![
                GalleryImage::new(
                    "https://images.unsplash.com/photo-1454165804606-c3d57bc86b40?w=400&h=300&fit=crop",
                    "Image 1",
                ),
                GalleryImage::new(
                    "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=400&h=300&fit=crop",
                    "Image 2",
                ),
                GalleryImage::new(
                    "https://images.unsplash.com/photo-1499951360447-b19be8fe80f5?w=400&h=300&fit=crop",
                    "Image 3",
                ),
                GalleryImage::new(
                    "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=400&h=300&fit=crop",
                    "Image 4",
                ),
            ],
            columns: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoProps {
    pub title: String,
    pub video_url: String,
    /// "16:9" or anything else, which renders as 4:3. A binary choice,
    /// not a general ratio parser.
    pub aspect_ratio: String,
}

impl Default for VideoProps {
    fn default() -> Self {
        VideoProps {
            title: "Watch Our Video".into(),
            video_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".into(),
            aspect_ratio: "16:9".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    pub fn new(question: &str, answer: &str) -> Self {
        FaqItem {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqProps {
    pub title: String,
    pub items: Vec<FaqItem>,
}

impl Default for FaqProps {
    fn default() -> Self {
        FaqProps {
            title: "Frequently Asked Questions".into(),
            items: vec![
                FaqItem::new(
                    "What is your return policy?",
                    "We offer a 30-day money-back guarantee.",
                ),
                FaqItem::new(
                    "How long does shipping take?",
                    "Shipping typically takes 3-5 business days.",
                ),
                FaqItem::new(
                    "Do you offer customer support?",
                    "Yes! Our support team is available 24/7.",
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardsProps {
    pub title: String,
    pub items: Vec<FeatureItem>,
    /// Same 12-unit grid rule as `GalleryProps::columns`.
    pub columns: u64,
}

impl Default for CardsProps {
    fn default() -> Self {
        CardsProps {
            title: "Our Services".into(),
            items: vec![
                FeatureItem::new("🚀", "Fast Delivery", "Get your product in no time"),
                FeatureItem::new("💪", "Quality", "Top-notch quality guaranteed"),
                FeatureItem::new("🎯", "Precision", "Accurate and reliable"),
            ],
            columns: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub image: String,
    pub bio: String,
}

impl TeamMember {
    pub fn new(name: &str, role: &str, image: &str, bio: &str) -> Self {
        TeamMember {
            name: name.into(),
            role: role.into(),
            image: image.into(),
            bio: bio.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamProps {
    pub title: String,
    pub members: Vec<TeamMember>,
}

impl Default for TeamProps {
    fn default() -> Self {
        TeamProps {
            title: "Meet Our Team".into(),
            members: vec![
                TeamMember::new(
                    "Alice Johnson",
                    "CEO & Founder",
                    "https://i.pravatar.cc/300?img=1",
                    "Passionate about innovation",
                ),
                TeamMember::new(
                    "Bob Smith",
                    "CTO",
                    "https://i.pravatar.cc/300?img=2",
                    "Tech enthusiast and problem solver",
                ),
                TeamMember::new(
                    "Carol White",
                    "Designer",
                    "https://i.pravatar.cc/300?img=3",
                    "Creating beautiful experiences",
                ),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

fn to_bag<T: Serialize>(props: T) -> Value {
    serde_json::to_value(props).expect("default property bags serialize to JSON objects")
}

/// The fully-populated default property bag for a kind. Total over the
/// closed enum; the same `Default` impls back both this function and the
/// renderer's partial-bag resolution, so the two can never disagree.
pub fn default_props(kind: ComponentKind) -> Value {
    match kind {
        ComponentKind::Hero => to_bag(HeroProps::default()),
        ComponentKind::Navbar => to_bag(NavbarProps::default()),
        ComponentKind::Features => to_bag(FeaturesProps::default()),
        ComponentKind::Cta => to_bag(CtaProps::default()),
        ComponentKind::Footer => to_bag(FooterProps::default()),
        ComponentKind::Text => to_bag(TextProps::default()),
        ComponentKind::Image => to_bag(ImageProps::default()),
        ComponentKind::ContactForm => to_bag(ContactFormProps::default()),
        ComponentKind::Testimonials => to_bag(TestimonialsProps::default()),
        ComponentKind::Pricing => to_bag(PricingProps::default()),
        ComponentKind::Gallery => to_bag(GalleryProps::default()),
        ComponentKind::Video => to_bag(VideoProps::default()),
        ComponentKind::Faq => to_bag(FaqProps::default()),
        ComponentKind::Cards => to_bag(CardsProps::default()),
        ComponentKind::Team => to_bag(TeamProps::default()),
    }
}

/// Palette/presentation metadata for one kind. Carries no rendering logic.
#[derive(Debug, Clone, Copy)]
pub struct KindInfo {
    pub kind: ComponentKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
}

const CATALOG: [KindInfo; 15] = [
    KindInfo { kind: ComponentKind::Hero, label: "Hero Section", icon: "🎯", category: "Basic" },
    KindInfo { kind: ComponentKind::Navbar, label: "Navigation Bar", icon: "📱", category: "Basic" },
    KindInfo { kind: ComponentKind::Text, label: "Text Block", icon: "📝", category: "Basic" },
    KindInfo { kind: ComponentKind::Image, label: "Image", icon: "🖼️", category: "Basic" },
    KindInfo { kind: ComponentKind::Cta, label: "Call to Action", icon: "📣", category: "Basic" },
    KindInfo { kind: ComponentKind::Footer, label: "Footer", icon: "📄", category: "Basic" },
    KindInfo { kind: ComponentKind::Features, label: "Features Grid", icon: "⭐", category: "Content" },
    KindInfo { kind: ComponentKind::Cards, label: "Card Grid", icon: "🃏", category: "Content" },
    KindInfo { kind: ComponentKind::Testimonials, label: "Testimonials", icon: "💬", category: "Content" },
    KindInfo { kind: ComponentKind::Team, label: "Team Members", icon: "👥", category: "Content" },
    KindInfo { kind: ComponentKind::Faq, label: "FAQ", icon: "❓", category: "Content" },
    KindInfo { kind: ComponentKind::Gallery, label: "Image Gallery", icon: "🖼️", category: "Media" },
    KindInfo { kind: ComponentKind::Video, label: "Video Embed", icon: "🎥", category: "Media" },
    KindInfo { kind: ComponentKind::ContactForm, label: "Contact Form", icon: "✉️", category: "Forms" },
    KindInfo { kind: ComponentKind::Pricing, label: "Pricing Table", icon: "💰", category: "Commerce" },
];

/// Ordered palette catalog, grouped by category for presentation.
pub fn kind_catalog() -> &'static [KindInfo] {
    &CATALOG
}
