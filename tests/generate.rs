use image::{Rgba, RgbaImage};

use qrcraft::{
    Color, ContactInfo, Customization, FormState, QrDecoder, QrGenerator, QrRenderer,
    RenderOptions, RenderSource, TabType, generate_vcard,
};

fn offline_generator() -> QrGenerator {
    let options = RenderOptions {
        remote_fallback: false,
        ..RenderOptions::default()
    };
    QrGenerator::with_renderer(QrRenderer::local_only(&options))
}

fn contact() -> ContactInfo {
    ContactInfo {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        phone: "+44 20 7946 0000".into(),
        email: "ada@example.org".into(),
        organization: "Analytical Engines".into(),
        url: "https://example.org".into(),
    }
}

#[tokio::test]
async fn url_form_renders_scannable_code() {
    let generator = offline_generator();
    let form = FormState {
        active_tab: TabType::Url,
        url_input: "example.com".into(),
        ..FormState::default()
    };

    let rendered = generator
        .generate(&form)
        .await
        .expect("render")
        .expect("non-empty form");

    assert_eq!(rendered.source, RenderSource::Local);
    assert_eq!(rendered.payload, "https://example.com");
    assert_eq!(rendered.image.dimensions(), (300, 300));

    let decoded = QrDecoder::new().decode(&rendered.image).expect("decode");
    assert_eq!(decoded.as_str(), Some("https://example.com"));
}

#[tokio::test]
async fn contact_form_encodes_vcard() {
    let generator = offline_generator();
    let form = FormState {
        active_tab: TabType::Contact,
        contact: contact(),
        ..FormState::default()
    };

    let rendered = generator.generate(&form).await.unwrap().unwrap();
    let decoded = QrDecoder::new().decode(&rendered.image).expect("decode vcard");
    assert_eq!(decoded.as_str(), Some(generate_vcard(&contact()).as_str()));
}

#[tokio::test]
async fn empty_forms_clear_instead_of_rendering() {
    let generator = offline_generator();

    let mut form = FormState {
        active_tab: TabType::Contact,
        contact: ContactInfo {
            organization: "Only an org".into(),
            ..ContactInfo::default()
        },
        ..FormState::default()
    };
    assert!(generator.generate(&form).await.unwrap().is_none());

    form.active_tab = TabType::Url;
    form.url_input = "   ".into();
    assert!(generator.generate(&form).await.unwrap().is_none());

    form.active_tab = TabType::Text;
    form.text_input = "typed then cleared".into();
    assert!(generator.generate(&form).await.unwrap().is_some());
    form.reset();
    assert!(generator.generate(&form).await.unwrap().is_none());
}

#[tokio::test]
async fn custom_colors_still_scan() {
    let generator = offline_generator();
    let form = FormState {
        active_tab: TabType::Text,
        text_input: "colored".into(),
        customization: Customization {
            foreground: Color::rgb(0x1e, 0x3a, 0x8a),
            background: Color::rgb(0xff, 0xf7, 0xed),
            ..Customization::default()
        },
        ..FormState::default()
    };

    let rendered = generator.generate(&form).await.unwrap().unwrap();
    assert_eq!(rendered.image.get_pixel(0, 0), &Rgba([0xff, 0xf7, 0xed, 255]));
    let decoded = QrDecoder::new().decode(&rendered.image).expect("decode colored");
    assert_eq!(decoded.as_str(), Some("colored"));
}

#[tokio::test]
async fn logo_is_composited_at_centre() {
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("logo.png");
    RgbaImage::from_pixel(32, 32, Rgba([230, 80, 0, 255]))
        .save(&logo_path)
        .unwrap();

    let generator = offline_generator();
    let form = FormState {
        active_tab: TabType::Url,
        url_input: "https://rust-lang.org".into(),
        customization: Customization {
            logo: Some(logo_path),
            logo_size: 30,
            ..Customization::default()
        },
        ..FormState::default()
    };

    let rendered = generator.generate(&form).await.unwrap().unwrap();
    assert_eq!(rendered.image.get_pixel(150, 150), &Rgba([230, 80, 0, 255]));
    // 90px logo leaves the white backdrop visible just outside its edge
    assert_eq!(rendered.image.get_pixel(150, 100), &Rgba([255, 255, 255, 255]));
}
