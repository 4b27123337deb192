//! Service information document rendered on the info page.
//!
//! The JSON is bundled with the app; every section is optional and a section
//! with nothing to show is left out entirely.

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InfoDocument {
    pub version: Option<String>,
    pub updated_at: Option<String>,
    pub overview: Option<Overview>,
    pub data_sources: Option<DataSources>,
    pub metrics: Option<Metrics>,
    pub report_priority: Option<ReportPriority>,
    pub missing_value_policy: Option<Map<String, Value>>,
    pub interpretation: Option<Interpretation>,
    pub sync_policy: Option<SyncPolicy>,
    pub limitations: Vec<String>,
    pub privacy: Option<Map<String, Value>>,
    pub changelog: Vec<ChangelogEntry>,
    pub roadmap: Vec<String>,
    pub contact: Option<Contact>,
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub purpose: Option<String>,
    pub audience: Option<String>,
    pub scope: Option<Scope>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scope {
    pub listing: Option<String>,
    pub years: Option<Value>,
    pub fs_priority: Vec<String>,
    pub reprt_priority: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub opendart: Option<OpenDart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpenDart {
    pub used_items: Vec<String>,
    pub excluded: Vec<String>,
    pub refresh_policy: Option<RefreshPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RefreshPolicy {
    pub manual_sync: Option<String>,
    pub auto_sync: Option<String>,
    pub cache_ttl_hours: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub definitions: Vec<MetricDefinition>,
    pub thresholds: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricDefinition {
    pub name: String,
    pub formula: String,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportPriority {
    pub reprt_code: Vec<String>,
    pub fs_div: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Interpretation {
    pub flow: Option<String>,
    pub color_rules: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncPolicy {
    pub auto: Option<SyncBehavior>,
    pub manual: Option<SyncAction>,
    pub retry: Option<RetryPolicy>,
    pub logging: Option<SyncLogging>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncBehavior {
    pub behavior: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncAction {
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: Option<Value>,
    pub backoff_seconds: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncLogging {
    pub collect: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangelogEntry {
    pub date: String,
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: Option<String>,
    pub github: Option<String>,
    pub slack: Option<String>,
}

/// A titled bullet list, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct InfoSection {
    pub title: &'static str,
    pub items: Vec<String>,
}

/// Scalars print bare, objects and arrays print as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn entries(map: &Map<String, Value>, render: impl Fn(&str, &Value) -> String) -> Vec<String> {
    map.iter().map(|(k, v)| render(k, v)).collect()
}

struct Builder {
    sections: Vec<InfoSection>,
}

impl Builder {
    fn push(&mut self, title: &'static str, items: Vec<String>) {
        if !items.is_empty() {
            self.sections.push(InfoSection { title, items });
        }
    }
}

impl InfoDocument {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// `v{version} · {updated_at}` with dashes for missing parts
    pub fn version_line(&self) -> String {
        format!(
            "v{} · {}",
            self.version.as_deref().unwrap_or("-"),
            self.updated_at.as_deref().unwrap_or("-")
        )
    }

    pub fn sections(&self) -> Vec<InfoSection> {
        let mut out = Builder { sections: Vec::new() };

        let mut items = Vec::new();
        if let Some(overview) = &self.overview {
            if let Some(purpose) = &overview.purpose {
                items.push(format!("목적: {}", purpose));
            }
            if let Some(audience) = &overview.audience {
                items.push(format!("대상 사용자: {}", audience));
            }
            if let Some(scope) = &overview.scope {
                if let Some(listing) = &scope.listing {
                    items.push(format!("지원 범위: {}", listing));
                }
                if let Some(years) = &scope.years {
                    items.push(format!("최근 {}개년", plain(years)));
                }
                if !scope.fs_priority.is_empty() {
                    items.push(format!("연결범위 우선순위: {}", scope.fs_priority.join(" → ")));
                }
                if !scope.reprt_priority.is_empty() {
                    items.push(format!("보고서 우선순위: {}", scope.reprt_priority.join(" → ")));
                }
            }
        }
        out.push("서비스 개요", items);

        let mut items = Vec::new();
        if let Some(dart) = self.data_sources.as_ref().and_then(|d| d.opendart.as_ref()) {
            if !dart.used_items.is_empty() {
                items.push(format!("OpenDART 사용 항목: {}", dart.used_items.join(", ")));
            }
            if !dart.excluded.is_empty() {
                items.push(format!("비포함: {}", dart.excluded.join(", ")));
            }
            if let Some(policy) = &dart.refresh_policy {
                if let Some(manual) = &policy.manual_sync {
                    items.push(format!("수동 동기화: {}", manual));
                }
                if let Some(auto) = &policy.auto_sync {
                    items.push(format!("자동 동기화: {}", auto));
                }
                if let Some(ttl) = &policy.cache_ttl_hours {
                    items.push(format!("캐시 만료: {}시간", plain(ttl)));
                }
            }
        }
        out.push("데이터 소스와 범위", items);

        if let Some(metrics) = &self.metrics {
            out.push(
                "지표 정의와 계산식",
                metrics
                    .definitions
                    .iter()
                    .map(|d| match &d.unit {
                        Some(unit) => format!("{}: {} ({})", d.name, d.formula, unit),
                        None => format!("{}: {}", d.name, d.formula),
                    })
                    .collect(),
            );
            if let Some(thresholds) = &metrics.thresholds {
                out.push(
                    "해석 기준표",
                    entries(thresholds, |k, v| match v {
                        Value::Object(bands) => format!(
                            "{}: {}",
                            k,
                            entries(bands, |kk, vv| format!("{} {}", kk, plain(vv))).join(", ")
                        ),
                        other => format!("{}: {}", k, plain(other)),
                    }),
                );
            }
        }

        if let Some(priority) = &self.report_priority {
            let mut items = Vec::new();
            if !priority.reprt_code.is_empty() {
                items.push(format!("reprt_code: {}", priority.reprt_code.join(" → ")));
            }
            if !priority.fs_div.is_empty() {
                items.push(format!("fs_div: {}", priority.fs_div.join(" → ")));
            }
            out.push("보고서·연결범위 우선순위", items);
        }

        if let Some(policy) = &self.missing_value_policy {
            out.push(
                "결측치·예외 처리",
                entries(policy, |k, v| format!("{}: {}", k, plain(v))),
            );
        }

        if let Some(interp) = &self.interpretation {
            let mut items = Vec::new();
            if let Some(flow) = &interp.flow {
                items.push(format!("흐름: {}", flow));
            }
            if let Some(rules) = &interp.color_rules {
                items.push(format!(
                    "컬러: {}",
                    entries(rules, |k, v| format!("{}:{}", k, plain(v))).join(", ")
                ));
            }
            out.push("해석 흐름·컬러 규칙", items);
        }

        if let Some(sync) = &self.sync_policy {
            let mut items = Vec::new();
            if let Some(behavior) = sync.auto.as_ref().and_then(|a| a.behavior.as_ref()) {
                items.push(format!("자동: {}", behavior));
            }
            if let Some(action) = sync.manual.as_ref().and_then(|m| m.action.as_ref()) {
                items.push(format!("수동: {}", action));
            }
            if let Some(retry) = &sync.retry {
                let show = |v: &Option<Value>| v.as_ref().map_or_else(|| "-".to_string(), plain);
                items.push(format!(
                    "재시도: {}회, {}초 간격",
                    show(&retry.max_attempts),
                    show(&retry.backoff_seconds)
                ));
            }
            if let Some(logging) = &sync.logging {
                items.push(format!("로그: {}", logging.collect.join(", ")));
            }
            out.push("동기화 정책", items);
        }

        out.push("한계와 면책", self.limitations.clone());

        if let Some(privacy) = &self.privacy {
            out.push(
                "개인정보 및 보안",
                entries(privacy, |k, v| format!("{}: {}", k, plain(v))),
            );
        }

        out.push(
            "버전·변경 이력",
            self.changelog
                .iter()
                .map(|c| format!("{}: {}", c.date, c.changes.join(", ")))
                .collect(),
        );

        out.push("로드맵", self.roadmap.clone());

        if let Some(contact) = &self.contact {
            let items = [
                ("이메일", &contact.email),
                ("깃허브", &contact.github),
                ("슬랙", &contact.slack),
            ]
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
            .collect();
            out.push("문의 채널", items);
        }

        out.push("라이선스·출처 고지", self.notices.clone());

        out.sections
    }
}
