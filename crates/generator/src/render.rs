//! The component renderer: one component instance in, one markup fragment
//! out. This is the single implementation of every kind's semantics; the
//! preview server, the site generator and the tests all call it, so what
//! you see in preview is exactly what gets published.
//!
//! Rendering never fails. Recognized kinds resolve their property bag
//! against registry defaults (missing keys fall back, provided keys win,
//! missing lists render empty); an unrecognized stored kind renders a
//! visibly-flagged placeholder instead of aborting the page.

use crate::fragment::{Element, Fragment};
use pagekit_core::component::*;
use pagekit_core::{Component, ComponentKind, LayoutDocument};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Resolve a stored (possibly partial) property bag into its typed record.
///
/// Resolution is per key: provided keys win, omitted keys take the
/// record's default, and a key whose value has the wrong type falls back
/// to its default alone without discarding valid sibling keys. A bag that
/// is not a JSON object at all resolves to the full default record, so
/// rendering stays total and deterministic.
fn resolve<T: DeserializeOwned + Serialize + Default>(props: &Value) -> T {
    let Some(provided) = props.as_object() else {
        return T::default();
    };
    let defaults = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => return T::default(),
    };

    let mut bag = defaults.clone();
    bag.extend(provided.iter().map(|(k, v)| (k.clone(), v.clone())));
    if let Ok(record) = serde_json::from_value(Value::Object(bag)) {
        return record;
    }

    // Some provided key carries the wrong type; re-apply keys one at a
    // time so only the offenders revert to their defaults.
    let mut bag = defaults;
    for (key, value) in provided {
        let mut trial = bag.clone();
        trial.insert(key.clone(), value.clone());
        if serde_json::from_value::<T>(Value::Object(trial.clone())).is_ok() {
            bag = trial;
        }
    }
    serde_json::from_value(Value::Object(bag)).unwrap_or_default()
}

/// Effective column span in the 12-unit grid. Supported column counts are
/// 2, 3 and 4; anything else is clamped into that range so the span is
/// always a whole number of units.
fn grid_span(columns: u64) -> u64 {
    12 / columns.clamp(2, 4)
}

/// Render one component instance to a markup fragment.
pub fn render(component: &Component) -> Fragment {
    match component.kind() {
        Some(ComponentKind::Hero) => hero(resolve(&component.props)),
        Some(ComponentKind::Navbar) => navbar(resolve(&component.props)),
        Some(ComponentKind::Features) => features(resolve(&component.props)),
        Some(ComponentKind::Cta) => cta(resolve(&component.props)),
        Some(ComponentKind::Footer) => footer(resolve(&component.props)),
        Some(ComponentKind::Text) => text(resolve(&component.props)),
        Some(ComponentKind::Image) => image(resolve(&component.props)),
        Some(ComponentKind::ContactForm) => contact_form(resolve(&component.props)),
        Some(ComponentKind::Testimonials) => testimonials(resolve(&component.props)),
        Some(ComponentKind::Pricing) => pricing(resolve(&component.props)),
        Some(ComponentKind::Gallery) => gallery(resolve(&component.props)),
        Some(ComponentKind::Video) => video(resolve(&component.props)),
        Some(ComponentKind::Faq) => faq(resolve(&component.props)),
        Some(ComponentKind::Cards) => cards(resolve(&component.props)),
        Some(ComponentKind::Team) => team(resolve(&component.props)),
        None => unknown(&component.kind),
    }
}

/// Render a whole layout document in stored order.
pub fn render_document(doc: &LayoutDocument) -> String {
    doc.iter()
        .map(|c| render(c).to_html())
        .collect::<Vec<_>>()
        .join("\n")
}

fn container() -> Element {
    Element::new("div").class("container")
}

/// Button anchor, emitted only when the label is non-empty. An empty
/// label deliberately means "no button", the one falsy-means-absent rule
/// in the schema. An empty link falls back to "#".
fn button(label: &str, link: &str, classes: &str) -> Option<Fragment> {
    if label.is_empty() {
        return None;
    }
    let href = if link.is_empty() { "#" } else { link };
    Some(
        Element::new("a")
            .class(classes)
            .attr("href", href)
            .text(label)
            .into(),
    )
}

fn hero(props: HeroProps) -> Fragment {
    let mut inner = container()
        .child(Element::new("h1").class("hero-title").text(&props.title))
        .child(
            Element::new("p")
                .class("hero-subtitle lead")
                .text(&props.subtitle),
        );
    if let Some(btn) = button(&props.button_text, &props.button_link, "btn btn-light btn-lg") {
        inner = inner.child(btn);
    }
    Element::new("section")
        .class("hero section")
        .class(format!("bg-{}", props.bg_color))
        .class(format!("text-{}", props.text_align))
        .child(inner)
        .into()
}

fn navbar(props: NavbarProps) -> Fragment {
    let links = props.links.iter().enumerate().map(|(i, link)| {
        Element::new("a")
            .class("nav-link")
            .attr("data-key", i.to_string())
            .attr("href", &link.url)
            .text(&link.text)
            .into()
    });
    Element::new("nav")
        .class("navbar")
        .class(format!("bg-{}", props.bg_color))
        .class(format!("text-{}", props.text_color))
        .child(
            container()
                .child(
                    Element::new("a")
                        .class("navbar-brand")
                        .attr("href", "/")
                        .text(&props.brand_name),
                )
                .child(Element::new("div").class("navbar-links").children(links)),
        )
        .into()
}

fn feature_cell(i: usize, item: &FeatureItem, span: u64, card: bool) -> Fragment {
    let body = Element::new("div")
        .class(if card { "card-body" } else { "feature-body" })
        .child(Element::new("div").class("feature-icon").text(&item.icon))
        .child(Element::new("h4").text(&item.title))
        .child(Element::new("p").class("text-muted").text(&item.description));
    let mut cell = Element::new("div")
        .class(format!("col-{}", span))
        .attr("data-key", i.to_string());
    if card {
        cell = cell.child(Element::new("div").class("card").child(body));
    } else {
        cell = cell.child(body);
    }
    cell.into()
}

fn features(props: FeaturesProps) -> Fragment {
    let items = props
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| feature_cell(i, item, 4, false));
    Element::new("section")
        .class("features section")
        .child(
            container()
                .child(Element::new("h2").class("section-title").text(&props.title))
                .child(Element::new("div").class("grid").children(items)),
        )
        .into()
}

fn cta(props: CtaProps) -> Fragment {
    let mut inner = container().child(Element::new("h2").text(&props.title));
    if !props.subtitle.is_empty() {
        inner = inner.child(Element::new("p").class("lead").text(&props.subtitle));
    }
    if let Some(btn) = button(&props.button_text, &props.button_link, "btn btn-light btn-lg") {
        inner = inner.child(btn);
    }
    Element::new("section")
        .class("cta section text-center")
        .class(format!("bg-{}", props.bg_color))
        .child(inner)
        .into()
}

fn footer(props: FooterProps) -> Fragment {
    let mut inner = container().child(Element::new("p").class("footer-text").text(&props.text));
    if !props.links.is_empty() {
        let links = props.links.iter().enumerate().map(|(i, link)| {
            Element::new("a")
                .class("footer-link")
                .attr("data-key", i.to_string())
                .attr("href", &link.url)
                .text(&link.text)
                .into()
        });
        inner = inner.child(Element::new("div").class("footer-links").children(links));
    }
    Element::new("footer")
        .class("footer")
        .class(format!("bg-{}", props.bg_color))
        .child(inner)
        .into()
}

fn text(props: TextProps) -> Fragment {
    // Three discrete size buckets, not a continuous scale.
    let size_class = match props.size.as_str() {
        "large" => "fs-3",
        "small" => "fs-6",
        _ => "fs-5",
    };
    Element::new("section")
        .class("text-section")
        .child(
            container()
                .class(format!("text-{}", props.align))
                .class(size_class)
                .child(Element::new("p").text(&props.content)),
        )
        .into()
}

fn image(props: ImageProps) -> Fragment {
    Element::new("section")
        .class("image-section")
        .child(
            container().class(format!("text-{}", props.align)).child(
                Element::new("img")
                    .class("img-fluid")
                    .attr("src", &props.src)
                    .attr("alt", &props.alt)
                    .attr("style", format!("max-width:{}", props.width))
                    .attr("loading", "lazy"),
            ),
        )
        .into()
}

fn contact_form(props: ContactFormProps) -> Fragment {
    let fields = props.fields.iter().enumerate().map(|(i, field)| {
        let control: Fragment = if field.field_type == "textarea" {
            let mut textarea = Element::new("textarea")
                .class("form-control")
                .attr("placeholder", &field.placeholder)
                .attr("rows", "4");
            if field.required {
                textarea = textarea.flag("required");
            }
            textarea.into()
        } else {
            let mut input = Element::new("input")
                .class("form-control")
                .attr("type", &field.field_type)
                .attr("placeholder", &field.placeholder);
            if field.required {
                input = input.flag("required");
            }
            input.into()
        };
        Element::new("div")
            .class("form-group")
            .attr("data-key", i.to_string())
            .child(Element::new("label").class("form-label").text(&field.label))
            .child(control)
            .into()
    });

    let submit_label = if props.button_text.is_empty() {
        "Submit"
    } else {
        &props.button_text
    };

    let mut inner = container()
        .class("narrow")
        .child(Element::new("h2").class("section-title").text(&props.title));
    if !props.subtitle.is_empty() {
        inner = inner.child(
            Element::new("p")
                .class("text-muted text-center")
                .text(&props.subtitle),
        );
    }
    inner = inner.child(
        Element::new("form").children(fields).child(
            Element::new("button")
                .class("btn btn-primary btn-lg")
                .attr("type", "submit")
                .text(submit_label),
        ),
    );

    Element::new("section")
        .class("contact-form section bg-light")
        .child(inner)
        .into()
}

fn testimonials(props: TestimonialsProps) -> Fragment {
    let items = props.items.iter().enumerate().map(|(i, item)| {
        Element::new("div")
            .class("col-4")
            .attr("data-key", i.to_string())
            .child(
                Element::new("div").class("card").child(
                    Element::new("div")
                        .class("card-body text-center")
                        .child(Element::new("div").class("avatar").text(&item.avatar))
                        .child(
                            Element::new("p")
                                .class("quote")
                                .text(format!("\"{}\"", item.text)),
                        )
                        .child(Element::new("h6").text(&item.name))
                        .child(Element::new("small").class("text-muted").text(&item.role)),
                ),
            )
            .into()
    });
    Element::new("section")
        .class("testimonials section bg-light")
        .child(
            container()
                .child(Element::new("h2").class("section-title").text(&props.title))
                .child(Element::new("div").class("grid").children(items)),
        )
        .into()
}

fn pricing(props: PricingProps) -> Fragment {
    let plans = props.plans.iter().enumerate().map(|(i, plan)| {
        let mut body = Element::new("div").class("card-body text-center");
        if plan.highlighted {
            body = body.child(Element::new("span").class("badge").text("Most Popular"));
        }
        body = body
            .child(Element::new("h4").text(&plan.name))
            .child(
                Element::new("div")
                    .class("price")
                    .text(&plan.price)
                    .child(Element::new("small").class("text-muted").text(&plan.period)),
            )
            .child(
                Element::new("ul").class("plan-features").children(
                    plan.features.iter().enumerate().map(|(fi, feature)| {
                        Element::new("li")
                            .attr("data-key", fi.to_string())
                            .text(feature)
                            .into()
                    }),
                ),
            )
            .child(
                Element::new("button")
                    .class(if plan.highlighted {
                        "btn btn-primary btn-lg"
                    } else {
                        "btn btn-outline btn-lg"
                    })
                    .text("Choose Plan"),
            );

        let card = Element::new("div")
            .class(if plan.highlighted {
                "card plan highlighted"
            } else {
                "card plan"
            })
            .child(body);
        Element::new("div")
            .class("col-4")
            .attr("data-key", i.to_string())
            .child(card)
            .into()
    });
    Element::new("section")
        .class("pricing section")
        .child(
            container()
                .child(Element::new("h2").class("section-title").text(&props.title))
                .child(Element::new("div").class("grid").children(plans)),
        )
        .into()
}

fn gallery(props: GalleryProps) -> Fragment {
    let span = grid_span(props.columns);
    let images = props.images.iter().enumerate().map(|(i, img)| {
        Element::new("div")
            .class(format!("col-{}", span))
            .attr("data-key", i.to_string())
            .child(
                Element::new("img")
                    .class("img-fluid gallery-img")
                    .attr("src", &img.src)
                    .attr("alt", &img.alt)
                    .attr("loading", "lazy"),
            )
            .into()
    });
    Element::new("section")
        .class("gallery section")
        .child(
            container()
                .child(Element::new("h2").class("section-title").text(&props.title))
                .child(Element::new("div").class("grid").children(images)),
        )
        .into()
}

fn video(props: VideoProps) -> Fragment {
    // "16:9" maps to a 56.25% padding ratio; anything else renders 4:3.
    let padding = if props.aspect_ratio == "16:9" {
        "56.25%"
    } else {
        "75%"
    };
    Element::new("section")
        .class("video section")
        .child(
            container()
                .child(Element::new("h2").class("section-title").text(&props.title))
                .child(
                    Element::new("div")
                        .class("video-frame")
                        .attr("style", format!("padding-bottom:{}", padding))
                        .child(
                            Element::new("iframe")
                                .attr("src", &props.video_url)
                                .attr("title", &props.title)
                                .flag("allowfullscreen"),
                        ),
                ),
        )
        .into()
}

fn faq(props: FaqProps) -> Fragment {
    let items = props.items.iter().enumerate().map(|(i, item)| {
        Element::new("details")
            .class("accordion-item")
            .attr("data-key", i.to_string())
            .child(Element::new("summary").text(&item.question))
            .child(Element::new("p").class("text-muted").text(&item.answer))
            .into()
    });
    Element::new("section")
        .class("faq section")
        .child(
            container()
                .class("narrow")
                .child(Element::new("h2").class("section-title").text(&props.title))
                .child(Element::new("div").class("accordion").children(items)),
        )
        .into()
}

fn cards(props: CardsProps) -> Fragment {
    let span = grid_span(props.columns);
    let items = props
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| feature_cell(i, item, span, true));
    Element::new("section")
        .class("cards section")
        .child(
            container()
                .child(Element::new("h2").class("section-title").text(&props.title))
                .child(Element::new("div").class("grid").children(items)),
        )
        .into()
}

fn team(props: TeamProps) -> Fragment {
    let members = props.members.iter().enumerate().map(|(i, member)| {
        Element::new("div")
            .class("col-4")
            .attr("data-key", i.to_string())
            .child(
                Element::new("div").class("card").child(
                    Element::new("div")
                        .class("card-body text-center")
                        .child(
                            Element::new("img")
                                .class("avatar-img")
                                .attr("src", &member.image)
                                .attr("alt", &member.name)
                                .attr("loading", "lazy"),
                        )
                        .child(Element::new("h5").text(&member.name))
                        .child(Element::new("p").class("role").text(&member.role))
                        .child(Element::new("p").class("text-muted").text(&member.bio)),
                ),
            )
            .into()
    });
    Element::new("section")
        .class("team section bg-light")
        .child(
            container()
                .child(Element::new("h2").class("section-title").text(&props.title))
                .child(Element::new("div").class("grid").children(members)),
        )
        .into()
}

/// Graceful-degradation path: one corrupted or future component must not
/// take the rest of the page down with it.
fn unknown(kind_tag: &str) -> Fragment {
    Element::new("div")
        .class("alert alert-warning")
        .attr("role", "alert")
        .child(Element::new("strong").text("Unknown component:"))
        .text(format!(" {}", kind_tag))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn component(kind: ComponentKind, props: serde_json::Value) -> Component {
        Component {
            id: "c1".into(),
            kind: kind.as_str().into(),
            props,
        }
    }

    #[test]
    fn test_every_kind_renders_from_empty_props() {
        for kind in ComponentKind::ALL {
            let html = render(&component(kind, json!({}))).to_html();
            assert!(!html.is_empty(), "{} rendered nothing", kind);
            assert!(
                !html.contains("Unknown component"),
                "{} hit the placeholder path",
                kind
            );
        }
    }

    #[test]
    fn test_empty_props_use_registry_defaults() {
        let html = render(&component(ComponentKind::Hero, json!({}))).to_html();
        assert!(html.contains("Welcome to Our Website"));
        assert!(html.contains("Get Started"));
        assert!(html.contains("bg-primary"));
        assert!(html.contains("text-center"));
    }

    #[test]
    fn test_partial_props_keep_provided_values() {
        let html = render(&component(
            ComponentKind::Hero,
            json!({ "title": "Hi there", "textAlign": "left" }),
        ))
        .to_html();
        assert!(html.contains("Hi there"));
        assert!(html.contains("text-left"));
        // Omitted keys still fall back.
        assert!(html.contains("Get Started"));
    }

    #[test]
    fn test_provided_empty_string_is_not_overridden() {
        let html = render(&component(ComponentKind::Hero, json!({ "title": "" }))).to_html();
        assert!(!html.contains("Welcome to Our Website"));
        assert!(html.contains("<h1 class=\"hero-title\"></h1>"));
    }

    #[test]
    fn test_empty_button_text_means_no_button() {
        let html =
            render(&component(ComponentKind::Hero, json!({ "buttonText": "" }))).to_html();
        assert!(!html.contains("<a class=\"btn"));
    }

    #[test]
    fn test_empty_button_link_falls_back_to_hash() {
        let html = render(&component(
            ComponentKind::Cta,
            json!({ "buttonText": "Go", "buttonLink": "" }),
        ))
        .to_html();
        assert!(html.contains("href=\"#\""));
    }

    #[test]
    fn test_missing_list_props_render_empty_not_error() {
        for kind in [
            ComponentKind::Navbar,
            ComponentKind::Features,
            ComponentKind::Pricing,
            ComponentKind::Gallery,
            ComponentKind::Faq,
            ComponentKind::Team,
        ] {
            let mut props = serde_json::Map::new();
            for key in ["links", "items", "plans", "images", "members", "fields"] {
                props.insert(key.to_string(), json!([]));
            }
            let html = render(&component(kind, Value::Object(props))).to_html();
            assert!(!html.contains("data-key"), "{} rendered list items", kind);
        }
    }

    #[test]
    fn test_list_items_render_in_stored_order_with_unique_keys() {
        let html = render(&component(
            ComponentKind::Navbar,
            json!({ "links": [
                { "text": "First", "url": "/1" },
                { "text": "Second", "url": "/2" },
                { "text": "Third", "url": "/3" },
            ]}),
        ))
        .to_html();
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        let third = html.find("Third").unwrap();
        assert!(first < second && second < third);
        for key in ["data-key=\"0\"", "data-key=\"1\"", "data-key=\"2\""] {
            assert_eq!(html.matches(key).count(), 1);
        }
    }

    #[test]
    fn test_gallery_columns_to_grid_span() {
        for (columns, span_class) in [(2, "col-6"), (3, "col-4"), (4, "col-3")] {
            let html = render(&component(
                ComponentKind::Gallery,
                json!({ "columns": columns, "images": [{ "src": "/a.png", "alt": "a" }] }),
            ))
            .to_html();
            assert!(html.contains(span_class), "columns={}", columns);
        }
    }

    #[test]
    fn test_gallery_columns_clamped_deterministically() {
        // Below range clamps to 2 (col-6), above range clamps to 4 (col-3).
        for (columns, span_class) in [(0, "col-6"), (1, "col-6"), (5, "col-3"), (99, "col-3")] {
            let html = render(&component(
                ComponentKind::Gallery,
                json!({ "columns": columns, "images": [{ "src": "/a.png", "alt": "a" }] }),
            ))
            .to_html();
            assert!(html.contains(span_class), "columns={}", columns);
        }
    }

    #[test]
    fn test_video_aspect_ratio_is_binary() {
        let wide = render(&component(ComponentKind::Video, json!({ "aspectRatio": "16:9" })))
            .to_html();
        assert!(wide.contains("padding-bottom:56.25%"));
        for other in ["4:3", "21:9", "nonsense"] {
            let html = render(&component(
                ComponentKind::Video,
                json!({ "aspectRatio": other }),
            ))
            .to_html();
            assert!(html.contains("padding-bottom:75%"), "ratio={}", other);
        }
    }

    #[test]
    fn test_text_size_buckets() {
        for (size, class) in [("small", "fs-6"), ("normal", "fs-5"), ("large", "fs-3")] {
            let html =
                render(&component(ComponentKind::Text, json!({ "size": size }))).to_html();
            assert!(html.contains(class), "size={}", size);
        }
        // Unrecognized bucket falls into normal.
        let html = render(&component(ComponentKind::Text, json!({ "size": "huge" }))).to_html();
        assert!(html.contains("fs-5"));
    }

    #[test]
    fn test_pricing_highlighted_is_cosmetic_only() {
        let props = json!({ "plans": [
            { "name": "Basic", "price": "$9", "period": "/mo", "features": ["A"], "highlighted": false },
            { "name": "Pro", "price": "$29", "period": "/mo", "features": ["B"], "highlighted": true },
        ]});
        let html = render(&component(ComponentKind::Pricing, props)).to_html();
        assert_eq!(html.matches("Most Popular").count(), 1);
        // Highlighting does not reorder plans.
        assert!(html.find("Basic").unwrap() < html.find("Pro").unwrap());
    }

    #[test]
    fn test_contact_form_field_kinds_and_submit_fallback() {
        let html = render(&component(
            ComponentKind::ContactForm,
            json!({ "buttonText": "", "fields": [
                { "type": "email", "label": "Email", "placeholder": "you@x.com", "required": true },
                { "type": "textarea", "label": "Message", "placeholder": "...", "required": false },
            ]}),
        ))
        .to_html();
        assert!(html.contains("<input class=\"form-control\" type=\"email\""));
        assert!(html.contains("required"));
        assert!(html.contains("<textarea"));
        // Empty submit label falls back to "Submit".
        assert!(html.contains(">Submit</button>"));
    }

    #[test]
    fn test_unknown_kind_renders_flagged_placeholder() {
        let component = Component {
            id: "x".into(),
            kind: "unknown_kind_x".into(),
            props: json!({}),
        };
        let html = render(&component).to_html();
        assert!(html.contains("Unknown component:"));
        assert!(html.contains("unknown_kind_x"));
    }

    #[test]
    fn test_user_content_is_escaped() {
        let html = render(&component(
            ComponentKind::Hero,
            json!({ "title": "<script>alert(1)</script>" }),
        ))
        .to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_document_keeps_stored_order() {
        let doc = LayoutDocument::new(vec![
            component(ComponentKind::Navbar, json!({ "brandName": "Acme" })),
            {
                let mut c = component(ComponentKind::Hero, json!({ "title": "Welcome" }));
                c.id = "c2".into();
                c
            },
        ]);
        let html = render_document(&doc);
        assert!(html.find("Acme").unwrap() < html.find("Welcome").unwrap());
    }

    #[test]
    fn test_wrong_typed_key_falls_back_alone() {
        let html = render(&component(ComponentKind::Hero, json!({ "title": 42 }))).to_html();
        assert!(html.contains("Welcome to Our Website"));
    }

    #[test]
    fn test_wrong_typed_key_keeps_valid_siblings() {
        let html = render(&component(
            ComponentKind::Hero,
            json!({ "title": "Custom Headline", "buttonText": 42 }),
        ))
        .to_html();
        // The provided title survives; only the mistyped key reverts.
        assert!(html.contains("Custom Headline"));
        assert!(!html.contains("Welcome to Our Website"));
        assert!(html.contains("Get Started"));
    }

    #[test]
    fn test_wrong_typed_list_key_keeps_valid_siblings() {
        let html = render(&component(
            ComponentKind::Navbar,
            json!({ "brandName": "Acme", "links": "oops" }),
        ))
        .to_html();
        assert!(html.contains("Acme"));
        // The mistyped links key falls back to the default link row.
        assert!(html.contains("href=\"/about\""));
    }

    #[test]
    fn test_non_object_bag_falls_back_to_defaults() {
        for bag in [json!("nonsense"), json!([1, 2]), json!(7), json!(null)] {
            let html = render(&component(ComponentKind::Hero, bag)).to_html();
            assert!(html.contains("Welcome to Our Website"));
        }
    }
}
