// ==========================================
// 多区域门店排班系统 - 命令行入口
// ==========================================
// 用法:
//   shift-roster                               列出全部区域
//   shift-roster <district_id> <year> <month>  打印门店月度网格与冲突摘要
// ==========================================

use shift_roster::api::{map_api_error, MonthScope};
use shift_roster::app::{get_default_db_path, AppState};
use shift_roster::logging;

fn main() {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 版本: {}", shift_roster::APP_NAME, shift_roster::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let app_state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("无法初始化AppState: {}", e);
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.as_slice() {
        [] => print_districts(&app_state),
        [district_id, year, month] => match (year.parse::<i32>(), month.parse::<u32>()) {
            (Ok(year), Ok(month)) => print_store_month(&app_state, MonthScope::new(district_id.as_str(), year, month)),
            _ => Err(format!("年月参数格式错误: {} {}", year, month)),
        },
        _ => Err("用法: shift-roster [<district_id> <year> <month>]".to_string()),
    };

    if let Err(message) = result {
        eprintln!("{}", message);
        std::process::exit(2);
    }
}

fn print_districts(app_state: &AppState) -> Result<(), String> {
    let districts = app_state
        .district_api
        .list_districts()
        .map_err(|e| map_api_error(&e))?;

    if districts.is_empty() {
        println!("(暂无区域)");
    }
    for district in districts {
        println!("{}\t{}", district.id, district.name);
    }
    Ok(())
}

fn print_store_month(app_state: &AppState, scope: MonthScope) -> Result<(), String> {
    let view = app_state
        .roster_api
        .load_store_month(&scope)
        .map_err(|e| map_api_error(&e))?;

    println!(
        "{} {}-{:02}",
        view.district.name, scope.year, scope.month
    );

    for row in &view.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .filter(|c| !c.label.is_empty() || !c.editable)
            .map(|c| {
                if c.editable {
                    format!("{:02}:{}", c.day, c.label)
                } else {
                    format!("{:02}:-", c.day)
                }
            })
            .collect();
        println!("{}\t{}", row.store_name, cells.join("  "));
    }

    if view.digest.is_empty() {
        println!("无冲突");
    } else {
        println!("冲突:");
        for line in &view.digest.lines {
            println!("  {}", line);
        }
        if view.digest.remaining > 0 {
            println!("  …另有 {} 条", view.digest.remaining);
        }
    }
    Ok(())
}
