//! Server-rendered HTML for the public landing page.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use pf_dao::project::ProjectDao;

use crate::{csrf::CSRF_FIELD, model::contact::ContactReqForm};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoticeLevel {
    Success,
    Warning,
}

impl NoticeLevel {
    fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug)]
pub struct Notice {
    level: NoticeLevel,
    message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: &str) -> Self {
        Self {
            level,
            message: message.to_owned(),
        }
    }
}

pub fn index(
    projects: &[ProjectDao],
    form: &ContactReqForm,
    csrf_token: &str,
    notices: &[Notice],
) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str(concat!(
        "<!DOCTYPE html>\n",
        "<html lang=\"fr\">\n",
        "<head>\n",
        "<meta charset=\"utf-8\">\n",
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        "<title>Portfolio</title>\n",
        "</head>\n",
        "<body>\n",
    ));

    for notice in notices {
        html.push_str(&format!(
            "<div class=\"alert alert-{}\" role=\"alert\">{}</div>\n",
            notice.level.css_class(),
            text(&notice.message)
        ));
    }

    html.push_str("<section id=\"projects\">\n<h2>Projets</h2>\n");
    for project in projects {
        html.push_str(&format!(
            "<article class=\"project\" data-id=\"{}\">\n<h3>{}</h3>\n<p>{}</p>\n",
            project.id(),
            text(project.name()),
            text(project.description())
        ));
        if let Some(image) = project.image() {
            html.push_str(&format!(
                "<img src=\"/static/{}\" alt=\"{}\">\n",
                attr(image),
                attr(project.name())
            ));
        }
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");

    html.push_str("<p><a href=\"/download\">Télécharger mon CV</a></p>\n");

    html.push_str("<section id=\"contact\">\n<form method=\"post\" action=\"/\">\n");
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"{CSRF_FIELD}\" value=\"{}\">\n",
        attr(csrf_token)
    ));
    html.push_str(&format!(
        "<label for=\"name\">Votre nom</label>\n<input class=\"form-control\" id=\"name\" name=\"name\" type=\"text\" required value=\"{}\">\n",
        attr(form.name())
    ));
    html.push_str(&format!(
        "<label for=\"email\">Votre adresse mail</label>\n<input class=\"form-control\" id=\"email\" name=\"email\" type=\"email\" required value=\"{}\">\n",
        attr(form.email())
    ));
    html.push_str(&format!(
        "<label for=\"message\">Votre message</label>\n<textarea class=\"form-control\" id=\"message\" name=\"message\" required style=\"height: 180px;\">{}</textarea>\n",
        text(form.message())
    ));
    html.push_str("<input type=\"submit\" value=\"Envoyer\">\n</form>\n</section>\n");

    html.push_str("</body>\n</html>\n");
    html
}
