use chrono::{Duration, NaiveDate, Utc};
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::api::models::{Lead, LeadSource, LeadStatus};

pub const DAILY_WINDOW_DAYS: i64 = 14;

const GOLD: RGBColor = RGBColor(201, 169, 97);
const NAVY: RGBColor = RGBColor(14, 26, 51);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadStats {
    pub total: usize,
    /// Every status in pipeline order, zeros included.
    pub by_status: Vec<(LeadStatus, usize)>,
    /// Sources that produced at least one lead, busiest first.
    pub by_source: Vec<(LeadSource, usize)>,
    /// One entry per day ending at `today`.
    pub daily: Vec<(NaiveDate, u32)>,
}

impl LeadStats {
    pub fn from_leads(leads: &[Lead], today: NaiveDate) -> Self {
        let by_status = LeadStatus::ALL
            .into_iter()
            .map(|status| (status, leads.iter().filter(|l| l.status == status).count()))
            .collect();

        let mut by_source: Vec<(LeadSource, usize)> = LeadSource::ALL
            .into_iter()
            .map(|source| (source, leads.iter().filter(|l| l.source == source).count()))
            .filter(|(_, count)| *count > 0)
            .collect();
        // stable, so ties keep declaration order
        by_source.sort_by(|a, b| b.1.cmp(&a.1));

        let first_day = today - Duration::days(DAILY_WINDOW_DAYS - 1);
        let mut daily: Vec<(NaiveDate, u32)> = (0..DAILY_WINDOW_DAYS)
            .map(|offset| (first_day + Duration::days(offset), 0))
            .collect();
        for lead in leads {
            let day = lead.created_at.date_naive();
            if day < first_day || day > today {
                continue;
            }
            let index = (day - first_day).num_days() as usize;
            daily[index].1 += 1;
        }

        Self { total: leads.len(), by_status, by_source, daily }
    }

    /// Share of leads marked converted, 0.0 when there are none.
    pub fn conversion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let converted = self
            .by_status
            .iter()
            .find(|(status, _)| *status == LeadStatus::Converted)
            .map(|(_, count)| *count)
            .unwrap_or(0);
        converted as f64 / self.total as f64
    }
}

fn draw_daily(canvas: HtmlCanvasElement, daily: &[(NaiveDate, u32)]) -> Result<(), String> {
    let backend = CanvasBackend::with_canvas_object(canvas).ok_or("canvas has no 2d context")?;
    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let max = daily.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption("Leads per day", ("sans-serif", 18))
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..daily.len(), 0..max + max / 10 + 1)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(daily.len())
        .x_label_formatter(&|x| {
            daily
                .get(*x)
                .map(|(date, _)| date.format("%d %b").to_string())
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| y.to_string())
        .axis_style(NAVY)
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(
            daily
                .iter()
                .enumerate()
                .map(|(i, (_, count))| Rectangle::new([(i, 0), (i + 1, *count)], GOLD.filled())),
        )
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

#[derive(Properties, PartialEq)]
pub struct LeadGraphProps {
    pub leads: Vec<Lead>,
}

#[function_component(LeadGraph)]
pub fn lead_graph(props: &LeadGraphProps) -> Html {
    let canvas_ref = use_node_ref();
    let stats = use_memo(
        |leads| LeadStats::from_leads(leads, Utc::now().date_naive()),
        props.leads.clone(),
    );

    {
        let canvas_ref = canvas_ref.clone();
        let daily = stats.daily.clone();
        use_effect_with_deps(
            move |daily| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    canvas.set_width(640);
                    canvas.set_height(320);
                    if let Err(e) = draw_daily(canvas, daily) {
                        log::error!("lead chart failed: {}", e);
                    }
                }
                || ()
            },
            daily,
        );
    }

    html! {
        <div class="lead-graph">
            <div class="stat-cards">
                <div class="stat-card">
                    <span class="stat-value">{ stats.total }</span>
                    <span class="stat-label">{"Leads"}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{ format!("{:.1}%", stats.conversion_rate() * 100.0) }</span>
                    <span class="stat-label">{"Converted"}</span>
                </div>
            </div>
            <canvas ref={canvas_ref} width="640" height="320" style="max-width: 100%;" />
            <div class="breakdowns">
                <div>
                    <h3>{"By status"}</h3>
                    <ul>
                        {
                            stats.by_status.iter().map(|(status, count)| html! {
                                <li key={status.as_str()}>
                                    <span class={classes!("status-pill", status.as_str())}>{ status.label() }</span>
                                    <strong>{ *count }</strong>
                                </li>
                            }).collect::<Html>()
                        }
                    </ul>
                </div>
                <div>
                    <h3>{"By source"}</h3>
                    <ul>
                        {
                            stats.by_source.iter().map(|(source, count)| html! {
                                <li key={source.as_str()}>
                                    <span>{ source.label() }</span>
                                    <strong>{ *count }</strong>
                                </li>
                            }).collect::<Html>()
                        }
                    </ul>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lead_at(day: u32, status: LeadStatus, source: LeadSource) -> Lead {
        Lead {
            id: format!("ld_{}", day),
            name: "Test".into(),
            email: "t@example.in".into(),
            phone: "9886012345".into(),
            message: None,
            source,
            status,
            priority: Default::default(),
            site_visit: None,
            utm: Default::default(),
            notes: Vec::new(),
            follow_up: None,
            created_at: Utc.with_ymd_and_hms(2026, 9, day, 12, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 20).unwrap()
    }

    #[test]
    fn daily_window_covers_fourteen_days_ending_today() {
        let stats = LeadStats::from_leads(&[], today());
        assert_eq!(stats.daily.len(), 14);
        assert_eq!(stats.daily[0].0, NaiveDate::from_ymd_opt(2026, 9, 7).unwrap());
        assert_eq!(stats.daily[13].0, today());
        assert_eq!(stats.conversion_rate(), 0.0);
    }

    #[test]
    fn counts_only_leads_inside_the_window() {
        let leads = [
            lead_at(1, LeadStatus::New, LeadSource::HeroForm),
            lead_at(7, LeadStatus::New, LeadSource::HeroForm),
            lead_at(20, LeadStatus::Contacted, LeadSource::PricePopup),
            lead_at(20, LeadStatus::Converted, LeadSource::PricePopup),
        ];
        let stats = LeadStats::from_leads(&leads, today());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.daily[0].1, 1);
        assert_eq!(stats.daily[13].1, 2);
        assert_eq!(stats.daily.iter().map(|(_, c)| c).sum::<u32>(), 3);
    }

    #[test]
    fn breakdowns() {
        let leads = [
            lead_at(10, LeadStatus::New, LeadSource::HeroForm),
            lead_at(11, LeadStatus::Converted, LeadSource::PricePopup),
            lead_at(12, LeadStatus::Converted, LeadSource::PricePopup),
            lead_at(13, LeadStatus::Lost, LeadSource::TimerPopup),
        ];
        let stats = LeadStats::from_leads(&leads, today());
        assert_eq!(stats.by_status.len(), LeadStatus::ALL.len());
        assert!(stats.by_status.contains(&(LeadStatus::Contacted, 0)));
        assert_eq!(stats.by_source[0], (LeadSource::PricePopup, 2));
        assert_eq!(stats.by_source.len(), 3);
        assert!((stats.conversion_rate() - 0.5).abs() < 1e-9);
    }
}
