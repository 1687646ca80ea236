use airsat::domain::{CustomerRecord, Prediction, AGE_MAX, RATING_FIELDS, RATING_MAX};

const TITLE: &str = "Airline Customer Satisfaction Prediction";

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; background-color: #DCC7AA; color: #000; }
.layout { display: flex; min-height: 100vh; }
aside { width: 22rem; padding: 1.5rem; background: #262730; color: #fff; }
aside label { display: block; margin-top: 0.8rem; }
aside small { display: block; color: #bbb; }
aside select, aside input { width: 100%; box-sizing: border-box; }
main { flex: 1; padding: 2rem 3rem; }
table { border-collapse: collapse; background: #DCC7AA; }
td { padding: 0.2rem 1rem 0.2rem 0; }
.error { color: #8b0000; }
@media (max-width: 768px) { .layout { flex-direction: column; } aside { width: auto; } }
"#;

/// 画面上の選択肢の並び（エンコード順とは独立）
const CUSTOMER_TYPE_OPTIONS: [&str; 2] = ["Loyal Customer", "Disloyal Customer"];
const TRAVEL_TYPE_OPTIONS: [&str; 2] = ["Personal Travel", "Business travel"];
const CLASS_OPTIONS: [&str; 3] = ["Economy", "Business", "Economy Plus"];
const DELAYED_OPTIONS: [&str; 2] = ["Yes", "No"];

pub fn index() -> String {
    render(None, "")
}

/// 予測結果と入力内容の確認を表示する
pub fn result(record: &CustomerRecord, prediction: &Prediction) -> String {
    let mut body = String::new();
    body.push_str("<h3>Prediction Result</h3>\n");
    body.push_str(&format!(
        "<p><strong>THE CUSTOMER IS {}</strong></p>\n",
        prediction.satisfaction
    ));
    body.push_str("<h3>Customer Data</h3>\n<table>\n");
    for (label, value) in record.display_fields() {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(label),
            escape(&value)
        ));
    }
    body.push_str("</table>\n");
    render(Some(record), &body)
}

pub fn error(message: &str) -> String {
    render(
        None,
        &format!(
            "<h3>Invalid input</h3>\n<p class=\"error\">{}</p>\n",
            escape(message)
        ),
    )
}

fn render(record: Option<&CustomerRecord>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Customer Satisfaction Prediction</title>
<style>{STYLE}</style>
</head>
<body>
<div class="layout">
<aside>
<h2>Enter Customer Details/Ratings</h2>
{form}
</aside>
<main>
<h1>{TITLE}</h1>
<p>This application predicts whether an Airline customer is <strong>SATISFIED</strong> or <strong>DISSATISFIED</strong> based on various input parameters.</p>
{body}
</main>
</div>
</body>
</html>
"#,
        form = form(record),
    )
}

fn form(record: Option<&CustomerRecord>) -> String {
    let text = |f: fn(&CustomerRecord) -> String| record.map(f);
    let mut html = String::from("<form method=\"post\" action=\"/predict\">\n");
    html.push_str(&select(
        "customer_type",
        "Customer Type",
        "Select if the customer is loyal or disloyal",
        &CUSTOMER_TYPE_OPTIONS,
        text(|r| r.customer_type.to_string()),
    ));
    html.push_str(&number(
        "age",
        "Age",
        "Enter the age of the customer",
        Some(u32::from(AGE_MAX)),
        text(|r| r.age.to_string()),
    ));
    html.push_str(&select(
        "type_of_travel",
        "Type of Travel",
        "Select the type of travel",
        &TRAVEL_TYPE_OPTIONS,
        text(|r| r.type_of_travel.to_string()),
    ));
    html.push_str(&select(
        "travel_class",
        "Class",
        "Select the travel class",
        &CLASS_OPTIONS,
        text(|r| r.travel_class.to_string()),
    ));
    html.push_str(&number(
        "flight_distance",
        "Flight Distance (in km)",
        "Enter the flight distance in kilometers",
        None,
        text(|r| r.flight_distance.to_string()),
    ));
    let ratings = record.map(CustomerRecord::ratings);
    for (i, (name, label, help)) in RATING_FIELDS.iter().enumerate() {
        html.push_str(&slider(
            name,
            label,
            help,
            ratings.map(|r| *r[i]).unwrap_or(0),
        ));
    }
    html.push_str(&number(
        "departure_delay",
        "Departure Delay in Minutes",
        "Enter the departure delay in minutes",
        None,
        text(|r| r.departure_delay.to_string()),
    ));
    html.push_str(&number(
        "arrival_delay",
        "Arrival Delay in Minutes",
        "Enter the arrival delay in minutes",
        None,
        text(|r| r.arrival_delay.to_string()),
    ));
    html.push_str(&select(
        "delayed",
        "Delayed",
        "Select if the flight was delayed",
        &DELAYED_OPTIONS,
        text(|r| r.delayed.to_string()),
    ));
    html.push_str("<p><button type=\"submit\">Predict Satisfaction</button></p>\n</form>");
    html
}

fn select(
    name: &str,
    label: &str,
    help: &str,
    options: &[&str],
    selected: Option<String>,
) -> String {
    let options = options
        .iter()
        .map(|option| {
            let mark = match selected.as_deref() == Some(*option) {
                true => " selected",
                false => "",
            };
            format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                escape(option),
                mark
            )
        })
        .collect::<String>();
    format!(
        "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">{options}</select>\n<small>{help}</small>\n"
    )
}

fn number(
    name: &str,
    label: &str,
    help: &str,
    max: Option<u32>,
    value: Option<String>,
) -> String {
    let max = max.map(|max| format!(" max=\"{max}\"")).unwrap_or_default();
    let value = value.unwrap_or_else(|| "0".to_owned());
    format!(
        "<label for=\"{name}\">{label}</label>\n<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"0\"{max} step=\"1\" value=\"{value}\" required>\n<small>{help}</small>\n"
    )
}

fn slider(name: &str, label: &str, help: &str, value: u8) -> String {
    format!(
        "<label for=\"{name}\">{label}: <output id=\"{name}_value\">{value}</output></label>\n<input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"0\" max=\"{RATING_MAX}\" step=\"1\" value=\"{value}\" oninput=\"{name}_value.value = this.value\">\n<small>{help}</small>\n"
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
