// ==========================================
// 多区域门店排班系统 - 门店网格 CSV 导出
// ==========================================
// 格式: 表头 "store,1,2,...,N"；每个门店一行，单元格为标签
//       生命周期之外的日期写 "-"
// ==========================================

use std::io::Write;

use crate::api::error::{ApiError, ApiResult};
use crate::api::roster_api::StoreMonthView;

/// 不可编辑日期的占位符
pub const DISABLED_CELL_MARK: &str = "-";

/// 将门店月度网格写为 CSV
///
/// # 返回
/// - Ok(usize): 写出的门店行数
/// - Err(ExportFailed): 写出失败
pub fn write_store_month_csv<W: Write>(view: &StoreMonthView, writer: W) -> ApiResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(view.days.len() + 1);
    header.push("store".to_string());
    header.extend(view.days.iter().map(|d| d.to_string()));
    wtr.write_record(&header).map_err(export_failed)?;

    for row in &view.rows {
        let mut record = Vec::with_capacity(row.cells.len() + 1);
        record.push(row.store_name.clone());
        for cell in &row.cells {
            if cell.editable {
                record.push(cell.label.clone());
            } else {
                record.push(DISABLED_CELL_MARK.to_string());
            }
        }
        wtr.write_record(&record).map_err(export_failed)?;
    }

    wtr.flush()
        .map_err(|e| ApiError::ExportFailed(e.to_string()))?;

    tracing::debug!(rows = view.rows.len(), "门店网格CSV导出完成");
    Ok(view.rows.len())
}

fn export_failed(err: csv::Error) -> ApiError {
    ApiError::ExportFailed(err.to_string())
}
