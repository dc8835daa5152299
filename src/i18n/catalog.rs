//! Message catalog

use super::Locale;

/// Every translatable message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Key {
    AppTitle,
    AppDescription,
    UrlTab,
    TextTab,
    ContactTab,
    EnterUrl,
    EnterText,
    ContactInformation,
    WebsiteUrl,
    UrlPlaceholder,
    UrlHelp,
    TextContent,
    TextPlaceholder,
    FirstName,
    FirstNamePlaceholder,
    LastName,
    LastNamePlaceholder,
    PhoneNumber,
    PhonePlaceholder,
    EmailAddress,
    EmailPlaceholder,
    Organization,
    OrganizationPlaceholder,
    Website,
    WebsitePlaceholder,
    ClearAllFields,
    GeneratedQrCode,
    ScanQrCode,
    FillFormPrompt,
    Download,
    CopyData,
    Copied,
    QrCodeData,
    FooterText,
    QrCodeAlt,
    Customization,
    ForegroundColor,
    BackgroundColor,
    AddLogo,
    LogoSize,
    UploadLogo,
    RemoveLogo,
    ColorAndLogo,
    CustomizeQr,
    HideCustomization,
    ShowCustomization,
    ShareQr,
    ShareError,
    Saved,
}

impl Key {
    /// Identifier shown when no catalog has the message
    pub fn as_str(self) -> &'static str {
        match self {
            Key::AppTitle => "appTitle",
            Key::AppDescription => "appDescription",
            Key::UrlTab => "urlTab",
            Key::TextTab => "textTab",
            Key::ContactTab => "contactTab",
            Key::EnterUrl => "enterUrl",
            Key::EnterText => "enterText",
            Key::ContactInformation => "contactInformation",
            Key::WebsiteUrl => "websiteUrl",
            Key::UrlPlaceholder => "urlPlaceholder",
            Key::UrlHelp => "urlHelp",
            Key::TextContent => "textContent",
            Key::TextPlaceholder => "textPlaceholder",
            Key::FirstName => "firstName",
            Key::FirstNamePlaceholder => "firstNamePlaceholder",
            Key::LastName => "lastName",
            Key::LastNamePlaceholder => "lastNamePlaceholder",
            Key::PhoneNumber => "phoneNumber",
            Key::PhonePlaceholder => "phonePlaceholder",
            Key::EmailAddress => "emailAddress",
            Key::EmailPlaceholder => "emailPlaceholder",
            Key::Organization => "organization",
            Key::OrganizationPlaceholder => "organizationPlaceholder",
            Key::Website => "website",
            Key::WebsitePlaceholder => "websitePlaceholder",
            Key::ClearAllFields => "clearAllFields",
            Key::GeneratedQrCode => "generatedQrCode",
            Key::ScanQrCode => "scanQrCode",
            Key::FillFormPrompt => "fillFormPrompt",
            Key::Download => "download",
            Key::CopyData => "copyData",
            Key::Copied => "copied",
            Key::QrCodeData => "qrCodeData",
            Key::FooterText => "footerText",
            Key::QrCodeAlt => "qrCodeAlt",
            Key::Customization => "customization",
            Key::ForegroundColor => "foregroundColor",
            Key::BackgroundColor => "backgroundColor",
            Key::AddLogo => "addLogo",
            Key::LogoSize => "logoSize",
            Key::UploadLogo => "uploadLogo",
            Key::RemoveLogo => "removeLogo",
            Key::ColorAndLogo => "colorAndLogo",
            Key::CustomizeQr => "customizeQR",
            Key::HideCustomization => "hideCustomization",
            Key::ShowCustomization => "showCustomization",
            Key::ShareQr => "shareQR",
            Key::ShareError => "shareError",
            Key::Saved => "saved",
        }
    }
}

pub(super) fn lookup(locale: Locale, key: Key) -> Option<&'static str> {
    match locale {
        Locale::EnUs => en_us(key),
        Locale::EsEs => es_es(key),
    }
}

fn en_us(key: Key) -> Option<&'static str> {
    Some(match key {
        Key::AppTitle => "QR Code Generator",
        Key::AppDescription => "Create QR codes for websites, text, and contact information",
        Key::UrlTab => "URL",
        Key::TextTab => "Text",
        Key::ContactTab => "Contact",
        Key::EnterUrl => "Enter URL",
        Key::EnterText => "Enter Text",
        Key::ContactInformation => "Contact Information",
        Key::WebsiteUrl => "Website URL",
        Key::UrlPlaceholder => "https://example.com",
        Key::UrlHelp => "Enter a website URL. We'll add https:// if needed.",
        Key::TextContent => "Text Content",
        Key::TextPlaceholder => "Enter any text you want to encode...",
        Key::FirstName => "First Name",
        Key::FirstNamePlaceholder => "John",
        Key::LastName => "Last Name",
        Key::LastNamePlaceholder => "Doe",
        Key::PhoneNumber => "Phone Number",
        Key::PhonePlaceholder => "+1 (555) 123-4567",
        Key::EmailAddress => "Email Address",
        Key::EmailPlaceholder => "john@example.com",
        Key::Organization => "Organization",
        Key::OrganizationPlaceholder => "Company Name",
        Key::Website => "Website",
        Key::WebsitePlaceholder => "https://johndoe.com",
        Key::ClearAllFields => "Clear All Fields",
        Key::GeneratedQrCode => "Generated QR Code",
        Key::ScanQrCode => "Scan this QR code with your phone's camera",
        Key::FillFormPrompt => "Fill in the form to generate your QR code",
        Key::Download => "Download",
        Key::CopyData => "Copy Data",
        Key::Copied => "Copied!",
        Key::QrCodeData => "QR Code Data",
        Key::FooterText => "Generate QR codes instantly. No data is stored or transmitted.",
        Key::QrCodeAlt => "QR Code",
        Key::Customization => "Customization",
        Key::ForegroundColor => "Foreground Color",
        Key::BackgroundColor => "Background Color",
        Key::AddLogo => "Add Logo",
        Key::LogoSize => "Logo Size",
        Key::UploadLogo => "Upload Logo",
        Key::RemoveLogo => "Remove Logo",
        Key::ColorAndLogo => "Colors & Logo",
        Key::CustomizeQr => "Customize QR Code",
        Key::HideCustomization => "Hide Customization",
        Key::ShowCustomization => "Show Customization",
        Key::ShareQr => "Share QR Code",
        Key::ShareError => "Sharing is not available; QR data copied to clipboard instead",
        Key::Saved => "Saved",
    })
}

fn es_es(key: Key) -> Option<&'static str> {
    Some(match key {
        Key::AppTitle => "Generador de Códigos QR",
        Key::AppDescription => "Crea códigos QR para sitios web, texto e información de contacto",
        Key::UrlTab => "URL",
        Key::TextTab => "Texto",
        Key::ContactTab => "Contacto",
        Key::EnterUrl => "Introduce la URL",
        Key::EnterText => "Introduce el texto",
        Key::ContactInformation => "Información de contacto",
        Key::WebsiteUrl => "URL del sitio web",
        Key::UrlPlaceholder => "https://ejemplo.com",
        Key::UrlHelp => "Introduce una URL. Añadiremos https:// si hace falta.",
        Key::TextContent => "Contenido de texto",
        Key::TextPlaceholder => "Escribe cualquier texto que quieras codificar...",
        Key::FirstName => "Nombre",
        Key::FirstNamePlaceholder => "Juan",
        Key::LastName => "Apellido",
        Key::LastNamePlaceholder => "Pérez",
        Key::PhoneNumber => "Número de teléfono",
        Key::PhonePlaceholder => "+34 600 123 456",
        Key::EmailAddress => "Correo electrónico",
        Key::EmailPlaceholder => "juan@ejemplo.com",
        Key::Organization => "Organización",
        Key::OrganizationPlaceholder => "Nombre de la empresa",
        Key::Website => "Sitio web",
        Key::WebsitePlaceholder => "https://juanperez.com",
        Key::ClearAllFields => "Borrar todos los campos",
        Key::GeneratedQrCode => "Código QR generado",
        Key::ScanQrCode => "Escanea este código QR con la cámara de tu teléfono",
        Key::FillFormPrompt => "Rellena el formulario para generar tu código QR",
        Key::Download => "Descargar",
        Key::CopyData => "Copiar datos",
        Key::Copied => "¡Copiado!",
        Key::QrCodeData => "Datos del código QR",
        Key::FooterText => {
            "Genera códigos QR al instante. No se almacena ni se transmite ningún dato."
        }
        Key::QrCodeAlt => "Código QR",
        Key::Customization => "Personalización",
        Key::ForegroundColor => "Color principal",
        Key::BackgroundColor => "Color de fondo",
        Key::AddLogo => "Añadir logotipo",
        Key::LogoSize => "Tamaño del logotipo",
        Key::UploadLogo => "Subir logotipo",
        Key::RemoveLogo => "Quitar logotipo",
        Key::ColorAndLogo => "Colores y logotipo",
        Key::CustomizeQr => "Personalizar código QR",
        Key::HideCustomization => "Ocultar personalización",
        Key::ShowCustomization => "Mostrar personalización",
        Key::ShareQr => "Compartir código QR",
        // No Spanish string yet; falls back to English
        Key::ShareError | Key::Saved => return None,
    })
}
