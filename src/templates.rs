use tera::Tera;

pub const BASE: &str = "base.html";
pub const INDEX: &str = "index.html";
pub const SERVICE: &str = "service.html";
pub const NOT_FOUND: &str = "not_found.html";
pub const LEAD_EMAIL: &str = "lead_email.html";

// embedded so the binary does not depend on the working directory
const TPL_BASE: &str = include_str!("../templates/base.html");
const TPL_INDEX: &str = include_str!("../templates/index.html");
const TPL_SERVICE: &str = include_str!("../templates/service.html");
const TPL_NOT_FOUND: &str = include_str!("../templates/not_found.html");
const TPL_LEAD_EMAIL: &str = include_str!("../templates/lead_email.html");

// autoescape stays on, every template ends in .html
pub fn load() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (BASE, TPL_BASE),
        (INDEX, TPL_INDEX),
        (SERVICE, TPL_SERVICE),
        (NOT_FOUND, TPL_NOT_FOUND),
        (LEAD_EMAIL, TPL_LEAD_EMAIL),
    ])?;
    Ok(tera)
}
