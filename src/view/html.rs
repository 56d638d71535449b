// src/view/html.rs
//! Server-side rendering of the catalog page.

use std::fmt::Write;

use crate::middleware::session::SessionContext;

use super::format::{initials, CurrencyFormat};
use super::list::{EmptyState, ListView};
use super::overlay::{DeleteConfirm, LoginForm, Overlay, OverlayKind, ProductForm};
use crate::models::product::Product;

const STYLE: &str = "<style>
body{font-family:sans-serif;margin:0;background:#f5f6f8}
.toolbar{display:flex;justify-content:space-between;padding:.75rem 1.5rem;background:#2e7d32;color:#fff}
.avatar{display:inline-block;border-radius:50%;background:#fff;color:#2e7d32;padding:.4rem;font-weight:bold}
.header,.search,.products,.empty-state,.error-banner{margin:1rem 1.5rem}
.products{border-collapse:collapse;width:calc(100% - 3rem);background:#fff}
.products td,.products th{padding:.5rem;border-bottom:1px solid #ddd;text-align:left}
.thumb{width:48px;height:48px;object-fit:cover}
.no-image{width:48px;height:48px;background:#eee;font-size:.7rem}
.overlay{position:fixed;inset:0;background:rgba(0,0,0,.45);display:flex;align-items:center;justify-content:center}
.modal{background:#fff;border-radius:8px;padding:1rem 1.5rem;min-width:22rem}
.modal label{display:block;margin:.5rem 0}
.error,.error-banner{color:#b71c1c}
</style>
";

pub struct Page<'a> {
    pub store_name: &'a str,
    pub currency: &'a CurrencyFormat,
    pub session: Option<&'a SessionContext>,
    pub list: &'a ListView,
    pub overlay: &'a Overlay,
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Link back to the catalog page, keeping the search term.
pub fn page_href(search: &str, overlay: Option<OverlayKind>, id: Option<&str>) -> String {
    let mut params = Vec::new();
    if !search.is_empty() {
        params.push(format!("q={}", urlencoding::encode(search)));
    }
    if let Some(kind) = overlay {
        params.push(format!("overlay={}", kind.as_str()));
    }
    if let Some(id) = id {
        params.push(format!("id={}", urlencoding::encode(id)));
    }
    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

fn action_href(path: &str, search: &str) -> String {
    if search.is_empty() {
        path.to_string()
    } else {
        format!("{path}?q={}", urlencoding::encode(search))
    }
}

pub fn render_page(page: &Page<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    let _ = writeln!(html, "<title>Products · {}</title>", escape(page.store_name));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");

    render_toolbar(&mut html, page);
    render_header(&mut html, page);
    render_body(&mut html, page);
    render_overlay(&mut html, page);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_toolbar(html: &mut String, page: &Page<'_>) {
    let search = page.list.search_term();
    html.push_str("<header class=\"toolbar\">\n");
    let _ = writeln!(html, "  <div class=\"store-name\">{}</div>", escape(page.store_name));
    html.push_str("  <div class=\"user-section\">\n");
    match page.session {
        Some(session) => {
            let _ = writeln!(
                html,
                "    <div class=\"avatar\">{}</div>\n    <span class=\"username\">{}</span>\n    \
                 <form method=\"post\" action=\"{}\"><button class=\"logout\" type=\"submit\">Sign out</button></form>",
                escape(&initials(&session.display_name)),
                escape(&session.display_name),
                escape(&action_href("/logout", search)),
            );
        }
        None => {
            let _ = writeln!(
                html,
                "    <a class=\"login\" href=\"{}\">Sign in</a>",
                escape(&page_href(search, Some(OverlayKind::Login), None)),
            );
        }
    }
    html.push_str("  </div>\n</header>\n");
}

fn render_header(html: &mut String, page: &Page<'_>) {
    let search = page.list.search_term();
    let _ = writeln!(
        html,
        "<div class=\"header\">\n  <h1>Products</h1>\n  <a class=\"add\" href=\"{}\">Add product</a>\n</div>",
        escape(&page_href(search, Some(OverlayKind::Add), None)),
    );
    let _ = writeln!(
        html,
        "<form class=\"search\" method=\"get\" action=\"/\">\n  \
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search products...\">\n</form>",
        escape(search),
    );
}

fn render_body(html: &mut String, page: &Page<'_>) {
    let search = page.list.search_term();

    if let Some(error) = page.list.error() {
        let _ = writeln!(
            html,
            "<div class=\"error-banner\">\n  <p>{}</p>\n  <a href=\"{}\">Retry</a>\n</div>",
            escape(error),
            escape(&page_href(search, None, None)),
        );
        return;
    }

    if let Some(empty) = page.list.empty_state() {
        let _ = writeln!(html, "<div class=\"empty-state\">\n  <p>{}</p>", empty.message());
        if empty == EmptyState::NoProducts {
            let _ = writeln!(
                html,
                "  <a class=\"add\" href=\"{}\">Add product</a>",
                escape(&page_href(search, Some(OverlayKind::Add), None)),
            );
        }
        html.push_str("</div>\n");
        return;
    }

    html.push_str(
        "<table class=\"products\">\n<thead><tr><th>Image</th><th>Name</th><th>Description</th>\
         <th>Price</th><th>Quantity</th><th>Actions</th></tr></thead>\n<tbody>\n",
    );
    for row in page.list.rows(page.currency) {
        let thumbnail = match &row.thumbnail {
            Some(url) => format!(
                "<img class=\"thumb\" src=\"{}\" alt=\"{}\">",
                escape(url),
                escape(&row.name)
            ),
            None => "<div class=\"no-image\">No image</div>".to_string(),
        };
        let link = |kind| escape(&page_href(search, Some(kind), Some(&row.id)));
        let _ = writeln!(
            html,
            "<tr data-id=\"{id}\"><td>{thumbnail}</td><td>{name}</td><td>{desc}</td>\
             <td class=\"price\" title=\"{code}\">{price}</td><td>{qty}</td><td class=\"actions\">\
             <a class=\"view\" href=\"{view}\">View</a> \
             <a class=\"edit\" href=\"{edit}\">Edit</a> \
             <a class=\"delete\" href=\"{delete}\">Delete</a></td></tr>",
            id = escape(&row.id),
            name = escape(&row.name),
            desc = escape(&row.description_preview),
            code = escape(&page.currency.code),
            price = escape(&row.price),
            qty = row.quantity,
            view = link(OverlayKind::View),
            edit = link(OverlayKind::Edit),
            delete = link(OverlayKind::Delete),
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

fn render_overlay(html: &mut String, page: &Page<'_>) {
    let search = page.list.search_term();
    let close = escape(&page_href(search, None, None));
    match page.overlay {
        Overlay::None => {}
        Overlay::ProductForm(form) => render_product_form(html, form, search, &close),
        Overlay::ConfirmDelete(dialog) => render_delete(html, dialog, search, &close),
        Overlay::Details(product) => render_details(html, product, page.currency, &close),
        Overlay::Login(form) => render_login(html, form, search, &close),
    }
}

// Disables the submit button and shows its busy label while the request runs.
const SUBMIT_ONCE: &str = "onsubmit=\"var b=this.querySelector('button[type=submit]');\
b.disabled=true;b.textContent=b.dataset.busy;\"";

fn modal_open(html: &mut String, title: &str, close: &str) {
    let _ = writeln!(
        html,
        "<div class=\"overlay\">\n<div class=\"modal\" role=\"dialog\" aria-label=\"{title}\">\n  \
         <div class=\"modal-header\"><h2>{title}</h2><a class=\"close\" href=\"{close}\">×</a></div>",
        title = escape(title),
    );
}

fn modal_error(html: &mut String, error: Option<&str>) {
    if let Some(error) = error {
        let _ = writeln!(html, "  <div class=\"error\">{}</div>", escape(error));
    }
}

fn render_product_form(html: &mut String, form: &ProductForm, search: &str, close: &str) {
    use super::overlay::FormMode;

    let action = match &form.mode {
        FormMode::Add => action_href("/products", search),
        FormMode::Edit { id } => action_href(&format!("/products/{}", urlencoding::encode(id)), search),
    };
    modal_open(html, form.title(), close);
    let d = &form.draft;
    let _ = writeln!(
        html,
        "  <form method=\"post\" action=\"{action}\" {SUBMIT_ONCE}>\n    \
         <label>Name <input type=\"text\" name=\"name\" value=\"{name}\" placeholder=\"Product name\"></label>\n    \
         <label>Image URL <input type=\"text\" name=\"imageUrl\" value=\"{image}\" placeholder=\"https://example.com/image.jpg\"></label>\n    \
         <label>Description <textarea name=\"description\" rows=\"3\">{desc}</textarea></label>\n    \
         <label>Price <input type=\"number\" name=\"price\" value=\"{price}\" min=\"0\" step=\"any\"></label>\n    \
         <label>Quantity <input type=\"number\" name=\"quantity\" value=\"{qty}\" min=\"0\" step=\"1\"></label>",
        action = escape(&action),
        name = escape(&d.name),
        image = escape(&d.image_url),
        desc = escape(&d.description),
        price = escape(&d.price),
        qty = escape(&d.quantity),
    );
    modal_error(html, form.state.error());
    let _ = writeln!(
        html,
        "    <div class=\"actions\"><a class=\"cancel\" href=\"{close}\">Cancel</a>\
         <button type=\"submit\" data-busy=\"Saving...\">{label}</button></div>\n  </form>\n</div>\n</div>",
        label = form.submit_label(),
    );
}

fn render_delete(html: &mut String, dialog: &DeleteConfirm, search: &str, close: &str) {
    let action = action_href(&format!("/products/{}/delete", urlencoding::encode(&dialog.id)), search);
    modal_open(html, "Confirm deletion", close);
    let _ = writeln!(
        html,
        "  <p>Are you sure you want to delete <strong>{name}</strong>?</p>\n  \
         <p class=\"warning\">This action cannot be undone.</p>",
        name = escape(&dialog.name),
    );
    modal_error(html, dialog.state.error());
    let _ = writeln!(
        html,
        "  <form method=\"post\" action=\"{action}\" {SUBMIT_ONCE}>\n    \
         <input type=\"hidden\" name=\"name\" value=\"{name}\">\n    \
         <div class=\"actions\"><a class=\"cancel\" href=\"{close}\">Cancel</a>\
         <button type=\"submit\" data-busy=\"Deleting...\">{label}</button></div>\n  </form>\n</div>\n</div>",
        action = escape(&action),
        name = escape(&dialog.name),
        label = dialog.submit_label(),
    );
}

fn render_details(html: &mut String, product: &Product, currency: &CurrencyFormat, close: &str) {
    modal_open(html, "Product details", close);
    let image = if product.image_url.is_empty() {
        "<div class=\"no-image\">No image</div>".to_string()
    } else {
        format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape(&product.image_url),
            escape(&product.name)
        )
    };
    let _ = writeln!(
        html,
        "  <div class=\"details\">\n    {image}\n    <h2 class=\"product-name\">{name}</h2>\n    \
         <p><span class=\"label\">Price:</span> {price}</p>\n    \
         <p><span class=\"label\">Available:</span> {qty} units</p>\n    \
         <h3>Description</h3>\n    <p class=\"description\">{desc}</p>\n  </div>\n</div>\n</div>",
        name = escape(&product.name),
        price = escape(&currency.format(product.price)),
        qty = product.quantity,
        desc = escape(&product.description),
    );
}

fn render_login(html: &mut String, form: &LoginForm, search: &str, close: &str) {
    modal_open(html, "Sign in", close);
    let _ = writeln!(
        html,
        "  <form method=\"post\" action=\"{action}\" {SUBMIT_ONCE}>\n    \
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\" required></label>\n    \
         <label>Password <input type=\"password\" name=\"password\" required></label>",
        action = escape(&action_href("/login", search)),
        email = escape(&form.email),
    );
    modal_error(html, form.state.error());
    let _ = writeln!(
        html,
        "    <button type=\"submit\" data-busy=\"Signing in...\">{}</button>\n  </form>\n</div>\n</div>",
        form.submit_label(),
    );
}
