//! Server-rendered HTML pages.
//!
//! Templates are embedded at compile time and registered once; the registry
//! is shared between workers as app data.

pub mod flash;

use actix_web::{HttpRequest, HttpResponse};
use handlebars::Handlebars;
use serde_json::{Value, json};

use crate::error::AppResult;
use flash::Flash;

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("templates/header.hbs")),
    ("footer", include_str!("templates/footer.hbs")),
];

const TEMPLATES: &[(&str, &str)] = &[
    ("login", include_str!("templates/login.hbs")),
    ("dashboard", include_str!("templates/dashboard.hbs")),
    ("asistencia", include_str!("templates/asistencia.hbs")),
    ("proyectos", include_str!("templates/proyectos.hbs")),
    ("reportes", include_str!("templates/reportes.hbs")),
    ("observaciones", include_str!("templates/observaciones.hbs")),
    ("lista_asistencia", include_str!("templates/lista_asistencia.hbs")),
    ("pdf_asistencia", include_str!("templates/pdf_asistencia.hbs")),
];

/// Template registry.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, Box<handlebars::TemplateError>> {
        let mut registry = Handlebars::new();

        for (name, source) in PARTIALS {
            registry.register_partial(name, *source).map_err(Box::new)?;
        }
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, *source)
                .map_err(Box::new)?;
        }

        Ok(Self { registry })
    }

    /// Render a template to a string.
    pub fn render(&self, name: &str, data: &Value) -> AppResult<String> {
        Ok(self.registry.render(name, data)?)
    }

    /// Render a full page, consuming any pending flash message.
    ///
    /// `data` must be a JSON object; the flash message is exposed as `flash`.
    pub fn page(&self, req: &HttpRequest, name: &str, mut data: Value) -> AppResult<HttpResponse> {
        let pending = Flash::from_request(req);
        self.page_with(name, &mut data, pending.clone(), pending.is_some())
    }

    /// Render a page with an explicit flash message (used when re-rendering a form).
    pub fn page_with_flash(
        &self,
        req: &HttpRequest,
        name: &str,
        mut data: Value,
        flash: Flash,
    ) -> AppResult<HttpResponse> {
        let had_cookie = Flash::from_request(req).is_some();
        self.page_with(name, &mut data, Some(flash), had_cookie)
    }

    fn page_with(
        &self,
        name: &str,
        data: &mut Value,
        flash: Option<Flash>,
        clear_cookie: bool,
    ) -> AppResult<HttpResponse> {
        if let Some(obj) = data.as_object_mut() {
            obj.insert("flash".to_string(), json!(flash));
        }
        let body = self.render(name, data)?;

        let mut builder = HttpResponse::Ok();
        builder.content_type("text/html; charset=utf-8");
        if clear_cookie {
            builder.cookie(flash::clear_cookie());
        }
        Ok(builder.body(body))
    }
}
