//! Content elements placed inside builder columns.
//!
//! Every element kind carries its own typed props payload with defaults.
//! Partial updates arrive as JSON objects and are shallow-merged into the
//! serialized props, then decoded back into the typed payload so a bad
//! patch can never reach the tree.

use super::NodeId;
use crate::color::SerializableColor;
use crate::error::{DocumentError, DocumentResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Every kind of content element the builder can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Headline,
    Subheadline,
    Paragraph,
    Button,
    Image,
    Logo,
    Video,
    Audio,
    Divider,
    Spacer,
    Icon,
    List,
    Form,
    Input,
    Textarea,
    Select,
    Checkbox,
    Countdown,
    Testimonial,
    PricingTable,
    Faq,
    ProgressBar,
    SocialIcons,
    Map,
    Html,
    Menu,
    Gallery,
    OrderForm,
    ProductCard,
    Rating,
}

impl ElementKind {
    /// All element kinds, in palette order.
    pub const ALL: [ElementKind; 30] = [
        ElementKind::Headline,
        ElementKind::Subheadline,
        ElementKind::Paragraph,
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Logo,
        ElementKind::Video,
        ElementKind::Audio,
        ElementKind::Divider,
        ElementKind::Spacer,
        ElementKind::Icon,
        ElementKind::List,
        ElementKind::Form,
        ElementKind::Input,
        ElementKind::Textarea,
        ElementKind::Select,
        ElementKind::Checkbox,
        ElementKind::Countdown,
        ElementKind::Testimonial,
        ElementKind::PricingTable,
        ElementKind::Faq,
        ElementKind::ProgressBar,
        ElementKind::SocialIcons,
        ElementKind::Map,
        ElementKind::Html,
        ElementKind::Menu,
        ElementKind::Gallery,
        ElementKind::OrderForm,
        ElementKind::ProductCard,
        ElementKind::Rating,
    ];

    /// Human readable name shown in the layers panel.
    pub fn display_name(self) -> &'static str {
        match self {
            ElementKind::Headline => "Headline",
            ElementKind::Subheadline => "Sub-headline",
            ElementKind::Paragraph => "Paragraph",
            ElementKind::Button => "Button",
            ElementKind::Image => "Image",
            ElementKind::Logo => "Logo",
            ElementKind::Video => "Video",
            ElementKind::Audio => "Audio",
            ElementKind::Divider => "Divider",
            ElementKind::Spacer => "Spacer",
            ElementKind::Icon => "Icon",
            ElementKind::List => "List",
            ElementKind::Form => "Form",
            ElementKind::Input => "Input",
            ElementKind::Textarea => "Text area",
            ElementKind::Select => "Select",
            ElementKind::Checkbox => "Checkbox",
            ElementKind::Countdown => "Countdown",
            ElementKind::Testimonial => "Testimonial",
            ElementKind::PricingTable => "Pricing table",
            ElementKind::Faq => "FAQ",
            ElementKind::ProgressBar => "Progress bar",
            ElementKind::SocialIcons => "Social icons",
            ElementKind::Map => "Map",
            ElementKind::Html => "Custom HTML",
            ElementKind::Menu => "Menu",
            ElementKind::Gallery => "Gallery",
            ElementKind::OrderForm => "Order form",
            ElementKind::ProductCard => "Product card",
            ElementKind::Rating => "Rating",
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Line style for dividers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// How an image fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

/// Headline, sub-headline and paragraph text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TextProps {
    pub text: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub color: SerializableColor,
    pub align: TextAlign,
    pub line_height: f64,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: "Lorem ipsum dolor sit amet".to_string(),
            font_size: 16.0,
            font_weight: 400,
            color: SerializableColor::rgb(0x1f, 0x29, 0x37),
            align: TextAlign::Left,
            line_height: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ButtonProps {
    pub text: String,
    pub url: String,
    pub open_in_new_tab: bool,
    pub background: SerializableColor,
    pub text_color: SerializableColor,
    pub font_size: f64,
    pub border_radius: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub full_width: bool,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            text: "Click Here".to_string(),
            url: "#".to_string(),
            open_in_new_tab: false,
            background: SerializableColor::rgb(0x25, 0x63, 0xeb),
            text_color: SerializableColor::white(),
            font_size: 18.0,
            border_radius: 6.0,
            padding_x: 32.0,
            padding_y: 14.0,
            full_width: false,
        }
    }
}

/// Images and logos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub width: Option<f64>,
    pub border_radius: f64,
    pub fit: ObjectFit,
    pub link: Option<String>,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: "Image".to_string(),
            width: None,
            border_radius: 0.0,
            fit: ObjectFit::Cover,
            link: None,
        }
    }
}

/// Video and audio embeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MediaProps {
    pub url: String,
    pub autoplay: bool,
    pub controls: bool,
    pub muted: bool,
    pub aspect_ratio: String,
}

impl Default for MediaProps {
    fn default() -> Self {
        Self {
            url: String::new(),
            autoplay: false,
            controls: true,
            muted: false,
            aspect_ratio: "16:9".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DividerProps {
    pub color: SerializableColor,
    pub thickness: f64,
    pub style: LineStyle,
    pub width_percent: f64,
}

impl Default for DividerProps {
    fn default() -> Self {
        Self {
            color: SerializableColor::rgb(0xe5, 0xe7, 0xeb),
            thickness: 1.0,
            style: LineStyle::Solid,
            width_percent: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpacerProps {
    pub height: f64,
}

impl Default for SpacerProps {
    fn default() -> Self {
        Self { height: 40.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct IconProps {
    pub icon: String,
    pub size: f64,
    pub color: SerializableColor,
}

impl Default for IconProps {
    fn default() -> Self {
        Self {
            icon: "star".to_string(),
            size: 32.0,
            color: SerializableColor::rgb(0x25, 0x63, 0xeb),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ListProps {
    pub items: Vec<String>,
    pub icon: String,
    pub icon_color: SerializableColor,
    pub font_size: f64,
}

impl Default for ListProps {
    fn default() -> Self {
        Self {
            items: vec![
                "First benefit".to_string(),
                "Second benefit".to_string(),
                "Third benefit".to_string(),
            ],
            icon: "check".to_string(),
            icon_color: SerializableColor::rgb(0x16, 0xa3, 0x4a),
            font_size: 16.0,
        }
    }
}

/// One field of an embedded form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub field_type: String,
    pub placeholder: String,
    pub required: bool,
}

impl Default for FormField {
    fn default() -> Self {
        Self {
            name: "field".to_string(),
            label: "Field".to_string(),
            field_type: "text".to_string(),
            placeholder: String::new(),
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FormProps {
    pub fields: Vec<FormField>,
    pub submit_text: String,
    pub redirect_url: Option<String>,
}

impl Default for FormProps {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField {
                    name: "name".to_string(),
                    label: "Name".to_string(),
                    placeholder: "Your name".to_string(),
                    required: true,
                    ..FormField::default()
                },
                FormField {
                    name: "email".to_string(),
                    label: "Email".to_string(),
                    field_type: "email".to_string(),
                    placeholder: "you@example.com".to_string(),
                    required: true,
                },
            ],
            submit_text: "Submit".to_string(),
            redirect_url: None,
        }
    }
}

/// Stand-alone input and text area fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldProps {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub input_type: String,
    pub required: bool,
    pub rows: u32,
}

impl Default for FieldProps {
    fn default() -> Self {
        Self {
            name: "input".to_string(),
            label: "Label".to_string(),
            placeholder: "Type here...".to_string(),
            input_type: "text".to_string(),
            required: false,
            rows: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SelectProps {
    pub name: String,
    pub label: String,
    pub options: Vec<String>,
    pub required: bool,
}

impl Default for SelectProps {
    fn default() -> Self {
        Self {
            name: "select".to_string(),
            label: "Choose one".to_string(),
            options: vec!["Option 1".to_string(), "Option 2".to_string()],
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckboxProps {
    pub name: String,
    pub label: String,
    pub checked: bool,
    pub required: bool,
}

impl Default for CheckboxProps {
    fn default() -> Self {
        Self {
            name: "agree".to_string(),
            label: "I agree to the terms".to_string(),
            checked: false,
            required: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CountdownProps {
    /// ISO-8601 end time; `None` until the author picks one.
    pub ends_at: Option<String>,
    pub show_days: bool,
    pub show_seconds: bool,
    pub expired_text: String,
    pub color: SerializableColor,
}

impl Default for CountdownProps {
    fn default() -> Self {
        Self {
            ends_at: None,
            show_days: true,
            show_seconds: true,
            expired_text: "This offer has expired".to_string(),
            color: SerializableColor::rgb(0x11, 0x18, 0x27),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TestimonialProps {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub avatar: Option<String>,
}

impl Default for TestimonialProps {
    fn default() -> Self {
        Self {
            quote: "This product changed how we work.".to_string(),
            author: "Jane Doe".to_string(),
            role: "Customer".to_string(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PricingTableProps {
    pub plan: String,
    pub price: f64,
    pub currency: String,
    pub period: String,
    pub features: Vec<String>,
    pub button_text: String,
    pub highlighted: bool,
}

impl Default for PricingTableProps {
    fn default() -> Self {
        Self {
            plan: "Pro".to_string(),
            price: 49.0,
            currency: "USD".to_string(),
            period: "month".to_string(),
            features: vec!["Unlimited pages".to_string(), "Priority support".to_string()],
            button_text: "Get Started".to_string(),
            highlighted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl Default for FaqItem {
    fn default() -> Self {
        Self {
            question: "What is included?".to_string(),
            answer: "Everything you need to get started.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FaqProps {
    pub items: Vec<FaqItem>,
    pub expand_first: bool,
}

impl Default for FaqProps {
    fn default() -> Self {
        Self {
            items: vec![FaqItem::default()],
            expand_first: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ProgressBarProps {
    pub percent: f64,
    pub label: String,
    pub color: SerializableColor,
    pub track_color: SerializableColor,
}

impl Default for ProgressBarProps {
    fn default() -> Self {
        Self {
            percent: 50.0,
            label: "Almost there!".to_string(),
            color: SerializableColor::rgb(0x25, 0x63, 0xeb),
            track_color: SerializableColor::rgb(0xe5, 0xe7, 0xeb),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkItem {
    pub label: String,
    pub url: String,
}

impl Default for LinkItem {
    fn default() -> Self {
        Self {
            label: "Link".to_string(),
            url: "#".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialIconsProps {
    /// Network name in `label`, profile URL in `url`.
    pub links: Vec<LinkItem>,
    pub size: f64,
    pub color: SerializableColor,
}

impl Default for SocialIconsProps {
    fn default() -> Self {
        let link = |label: &str| LinkItem {
            label: label.to_string(),
            url: "#".to_string(),
        };
        Self {
            links: vec![link("facebook"), link("instagram"), link("x")],
            size: 24.0,
            color: SerializableColor::rgb(0x37, 0x41, 0x51),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MapProps {
    pub address: String,
    pub zoom: u8,
    pub height: f64,
}

impl Default for MapProps {
    fn default() -> Self {
        Self {
            address: "New York, NY".to_string(),
            zoom: 14,
            height: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct HtmlProps {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MenuProps {
    pub items: Vec<LinkItem>,
    pub color: SerializableColor,
    pub font_size: f64,
    pub align: TextAlign,
}

impl Default for MenuProps {
    fn default() -> Self {
        let item = |label: &str, url: &str| LinkItem {
            label: label.to_string(),
            url: url.to_string(),
        };
        Self {
            items: vec![item("Home", "/"), item("About", "#about"), item("Contact", "#contact")],
            color: SerializableColor::rgb(0x1f, 0x29, 0x37),
            font_size: 16.0,
            align: TextAlign::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GalleryProps {
    pub images: Vec<String>,
    pub columns: u8,
    pub gap: f64,
}

impl Default for GalleryProps {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            columns: 3,
            gap: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderFormProps {
    pub product_name: String,
    pub price: f64,
    pub currency: String,
    pub button_text: String,
    pub collect_shipping: bool,
}

impl Default for OrderFormProps {
    fn default() -> Self {
        Self {
            product_name: "Product".to_string(),
            price: 97.0,
            currency: "USD".to_string(),
            button_text: "Complete Order".to_string(),
            collect_shipping: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductCardProps {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub price: f64,
    pub currency: String,
    pub button_text: String,
}

impl Default for ProductCardProps {
    fn default() -> Self {
        Self {
            title: "Product name".to_string(),
            description: "A short description of the product.".to_string(),
            image: None,
            price: 29.0,
            currency: "USD".to_string(),
            button_text: "Buy Now".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RatingProps {
    pub value: f64,
    pub max: u8,
    pub size: f64,
    pub color: SerializableColor,
}

impl Default for RatingProps {
    fn default() -> Self {
        Self {
            value: 5.0,
            max: 5,
            size: 20.0,
            color: SerializableColor::rgb(0xf5, 0x9e, 0x0b),
        }
    }
}

/// Typed props, one variant per element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props", rename_all = "camelCase")]
pub enum ElementProps {
    Headline(TextProps),
    Subheadline(TextProps),
    Paragraph(TextProps),
    Button(ButtonProps),
    Image(ImageProps),
    Logo(ImageProps),
    Video(MediaProps),
    Audio(MediaProps),
    Divider(DividerProps),
    Spacer(SpacerProps),
    Icon(IconProps),
    List(ListProps),
    Form(FormProps),
    Input(FieldProps),
    Textarea(FieldProps),
    Select(SelectProps),
    Checkbox(CheckboxProps),
    Countdown(CountdownProps),
    Testimonial(TestimonialProps),
    PricingTable(PricingTableProps),
    Faq(FaqProps),
    ProgressBar(ProgressBarProps),
    SocialIcons(SocialIconsProps),
    Map(MapProps),
    Html(HtmlProps),
    Menu(MenuProps),
    Gallery(GalleryProps),
    OrderForm(OrderFormProps),
    ProductCard(ProductCardProps),
    Rating(RatingProps),
}

impl ElementProps {
    /// Default props for a freshly placed element of `kind`.
    pub fn defaults_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Headline => ElementProps::Headline(TextProps {
                text: "Your Headline Here".to_string(),
                font_size: 40.0,
                font_weight: 700,
                align: TextAlign::Center,
                line_height: 1.2,
                ..TextProps::default()
            }),
            ElementKind::Subheadline => ElementProps::Subheadline(TextProps {
                text: "Supporting sub-headline".to_string(),
                font_size: 24.0,
                font_weight: 500,
                align: TextAlign::Center,
                line_height: 1.3,
                color: SerializableColor::rgb(0x4b, 0x55, 0x63),
            }),
            ElementKind::Paragraph => ElementProps::Paragraph(TextProps::default()),
            ElementKind::Button => ElementProps::Button(ButtonProps::default()),
            ElementKind::Image => ElementProps::Image(ImageProps::default()),
            ElementKind::Logo => ElementProps::Logo(ImageProps {
                alt: "Logo".to_string(),
                width: Some(160.0),
                fit: ObjectFit::Contain,
                link: Some("/".to_string()),
                ..ImageProps::default()
            }),
            ElementKind::Video => ElementProps::Video(MediaProps::default()),
            ElementKind::Audio => ElementProps::Audio(MediaProps {
                aspect_ratio: String::new(),
                ..MediaProps::default()
            }),
            ElementKind::Divider => ElementProps::Divider(DividerProps::default()),
            ElementKind::Spacer => ElementProps::Spacer(SpacerProps::default()),
            ElementKind::Icon => ElementProps::Icon(IconProps::default()),
            ElementKind::List => ElementProps::List(ListProps::default()),
            ElementKind::Form => ElementProps::Form(FormProps::default()),
            ElementKind::Input => ElementProps::Input(FieldProps::default()),
            ElementKind::Textarea => ElementProps::Textarea(FieldProps {
                name: "message".to_string(),
                label: "Message".to_string(),
                input_type: "textarea".to_string(),
                rows: 4,
                ..FieldProps::default()
            }),
            ElementKind::Select => ElementProps::Select(SelectProps::default()),
            ElementKind::Checkbox => ElementProps::Checkbox(CheckboxProps::default()),
            ElementKind::Countdown => ElementProps::Countdown(CountdownProps::default()),
            ElementKind::Testimonial => ElementProps::Testimonial(TestimonialProps::default()),
            ElementKind::PricingTable => ElementProps::PricingTable(PricingTableProps::default()),
            ElementKind::Faq => ElementProps::Faq(FaqProps::default()),
            ElementKind::ProgressBar => ElementProps::ProgressBar(ProgressBarProps::default()),
            ElementKind::SocialIcons => ElementProps::SocialIcons(SocialIconsProps::default()),
            ElementKind::Map => ElementProps::Map(MapProps::default()),
            ElementKind::Html => ElementProps::Html(HtmlProps {
                html: "<div>Custom HTML</div>".to_string(),
            }),
            ElementKind::Menu => ElementProps::Menu(MenuProps::default()),
            ElementKind::Gallery => ElementProps::Gallery(GalleryProps::default()),
            ElementKind::OrderForm => ElementProps::OrderForm(OrderFormProps::default()),
            ElementKind::ProductCard => ElementProps::ProductCard(ProductCardProps::default()),
            ElementKind::Rating => ElementProps::Rating(RatingProps::default()),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementProps::Headline(_) => ElementKind::Headline,
            ElementProps::Subheadline(_) => ElementKind::Subheadline,
            ElementProps::Paragraph(_) => ElementKind::Paragraph,
            ElementProps::Button(_) => ElementKind::Button,
            ElementProps::Image(_) => ElementKind::Image,
            ElementProps::Logo(_) => ElementKind::Logo,
            ElementProps::Video(_) => ElementKind::Video,
            ElementProps::Audio(_) => ElementKind::Audio,
            ElementProps::Divider(_) => ElementKind::Divider,
            ElementProps::Spacer(_) => ElementKind::Spacer,
            ElementProps::Icon(_) => ElementKind::Icon,
            ElementProps::List(_) => ElementKind::List,
            ElementProps::Form(_) => ElementKind::Form,
            ElementProps::Input(_) => ElementKind::Input,
            ElementProps::Textarea(_) => ElementKind::Textarea,
            ElementProps::Select(_) => ElementKind::Select,
            ElementProps::Checkbox(_) => ElementKind::Checkbox,
            ElementProps::Countdown(_) => ElementKind::Countdown,
            ElementProps::Testimonial(_) => ElementKind::Testimonial,
            ElementProps::PricingTable(_) => ElementKind::PricingTable,
            ElementProps::Faq(_) => ElementKind::Faq,
            ElementProps::ProgressBar(_) => ElementKind::ProgressBar,
            ElementProps::SocialIcons(_) => ElementKind::SocialIcons,
            ElementProps::Map(_) => ElementKind::Map,
            ElementProps::Html(_) => ElementKind::Html,
            ElementProps::Menu(_) => ElementKind::Menu,
            ElementProps::Gallery(_) => ElementKind::Gallery,
            ElementProps::OrderForm(_) => ElementKind::OrderForm,
            ElementProps::ProductCard(_) => ElementKind::ProductCard,
            ElementProps::Rating(_) => ElementKind::Rating,
        }
    }

    /// Decode props for `kind` from a JSON object, filling missing keys with
    /// the payload defaults.
    pub fn from_json(kind: ElementKind, props: Value) -> DocumentResult<Self> {
        let tagged = serde_json::json!({ "type": kind, "props": props });
        serde_json::from_value(tagged).map_err(|e| DocumentError::InvalidProps {
            kind,
            reason: e.to_string(),
        })
    }

    /// The props payload as a JSON object.
    pub fn to_json(&self) -> DocumentResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(mut tagged) => match tagged.remove("props") {
                Some(Value::Object(props)) => Ok(props),
                _ => Ok(Map::new()),
            },
            _ => Ok(Map::new()),
        }
    }

    /// Shallow-merge `patch` over these props.
    ///
    /// Top-level keys in the patch replace the existing values wholesale;
    /// nested objects are not merged. The result must still decode as the
    /// same element kind.
    pub fn merge_patch(&self, patch: &Value) -> DocumentResult<Self> {
        let patch = patch.as_object().ok_or(DocumentError::PatchNotObject)?;
        let mut props = self.to_json()?;
        for (key, value) in patch {
            props.insert(key.clone(), value.clone());
        }
        Self::from_json(self.kind(), Value::Object(props))
    }
}

/// A leaf content node owned by exactly one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: ElementProps,
}

impl Element {
    /// Create an element of `kind` with its default props.
    pub fn new(kind: ElementKind) -> Self {
        Self::with_props(ElementProps::defaults_for(kind))
    }

    pub fn with_props(content: ElementProps) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            content,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    /// Name shown in the layers panel.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.kind().display_name())
    }

    /// Copy with a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }
}
