use chrono::NaiveDate;
use serde::Serialize;

/// 本次运行使用的预测值区间
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PredictionWindow {
    /// 由预测值日期计算回测区间
    ///
    /// 起始日取最早日期与下限的较大值；最新一天尚未结算，结束日取倒数第二个日期。
    /// 不足两个日期时返回去重后的日期数
    pub fn from_dates(dates: &[NaiveDate], floor_date: NaiveDate) -> Result<Self, usize> {
        let mut dates = dates.to_vec();
        dates.sort_unstable();
        dates.dedup();
        if dates.len() < 2 {
            return Err(dates.len());
        }
        let start_date = dates[0].max(floor_date);
        let end_date = dates[dates.len() - 2];
        Ok(PredictionWindow {
            start_date,
            end_date,
        })
    }
}
