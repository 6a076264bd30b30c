use web_sys::Document;

use crate::error::SiteError;

pub const REVEAL_STYLES: &str = r#"
    .stats-card,
    .service-card,
    .feature-card,
    .portfolio-item,
    .testimonial-card,
    .process-step,
    .benefit-item {
        opacity: 0;
        transform: translateY(30px);
        transition: all 0.6s cubic-bezier(0.4, 0, 0.2, 1);
    }

    .animate-in {
        opacity: 1 !important;
        transform: translateY(0) !important;
    }

    .process-step:nth-child(1) { transition-delay: 0.1s; }
    .process-step:nth-child(2) { transition-delay: 0.2s; }
    .process-step:nth-child(3) { transition-delay: 0.3s; }
    .process-step:nth-child(4) { transition-delay: 0.4s; }
    .process-step:nth-child(5) { transition-delay: 0.5s; }

    .benefit-item:nth-child(1) { transition-delay: 0.1s; }
    .benefit-item:nth-child(2) { transition-delay: 0.2s; }
    .benefit-item:nth-child(3) { transition-delay: 0.3s; }
    .benefit-item:nth-child(4) { transition-delay: 0.4s; }
    .benefit-item:nth-child(5) { transition-delay: 0.5s; }
    .benefit-item:nth-child(6) { transition-delay: 0.6s; }
"#;

pub const IMAGE_STYLES: &str = r#"
    img {
        opacity: 0;
        transition: opacity 0.3s ease;
    }

    img.loaded {
        opacity: 1;
    }
"#;

pub fn inject(document: &Document, css: &str) -> Result<(), SiteError> {
    let head = document.head().ok_or(SiteError::MissingElement("head"))?;
    let style = document.create_element("style")?;
    style.set_text_content(Some(css));
    head.append_child(&style)?;
    Ok(())
}
