// ==========================================
// 人员 / 门店 / 区域管理 API 集成测试
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use helpers::test_data_builder::*;
use shift_roster::api::{ApiError, ListFilter, StoreDraft};
use shift_roster::domain::StatusFilter;

// ==========================================
// 区域
// ==========================================

#[test]
fn test_list_districts_按名称排序() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    assert!(env.district_api.list_districts().expect("查询失败").is_empty());

    env.district_repo.insert(&district("D2", "Beta")).expect("插入失败");
    env.district_repo.insert(&district("D1", "Alpha")).expect("插入失败");

    let names: Vec<String> = env
        .district_api
        .list_districts()
        .expect("查询失败")
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);

    assert_eq!(env.district_api.get_district("D1").expect("查询失败").name, "Alpha");
    assert!(matches!(env.district_api.get_district("D404"), Err(ApiError::NotFound(_))));
}

// ==========================================
// 人员
// ==========================================

#[test]
fn test_create_employee_校验() {
    let env = ApiTestEnv::with_catalog().expect("无法创建测试环境");

    let created = env
        .staff_api
        .create_employee("  Olena  ", "D1", true)
        .expect("创建失败");
    assert_eq!(created.full_name, "Olena");
    assert_eq!(created.main_district_id.as_deref(), Some("D1"));
    assert_eq!(created.company_id, COMPANY);

    assert!(matches!(
        env.staff_api.create_employee("   ", "D1", true),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        env.staff_api.create_employee("Ivan", "", true),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        env.staff_api.create_employee("Ivan", "D404", true),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_update_employee() {
    let env = ApiTestEnv::with_catalog().expect("无法创建测试环境");
    let created = env.staff_api.create_employee("Olena", "D1", true).expect("创建失败");

    let updated = env
        .staff_api
        .update_employee(&created.id, "Olena K", "D2", false)
        .expect("更新失败");
    assert_eq!(updated.full_name, "Olena K");
    assert_eq!(updated.main_district_id.as_deref(), Some("D2"));
    assert!(!updated.is_active);

    let stored = env.employee_repo.find_by_id(&created.id).expect("查询失败").expect("记录缺失");
    assert_eq!(stored, updated);

    assert!(matches!(
        env.staff_api.update_employee("E404", "X", "D1", true),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn test_list_employees_筛选() {
    let env = ApiTestEnv::with_catalog().expect("无法创建测试环境");
    env.add_employee(EmployeeBuilder::new("E1", "Anna").district("D1").build());
    env.add_employee(EmployeeBuilder::new("E2", "Hanna").district("D2").build());
    env.add_employee(EmployeeBuilder::new("E3", "Boris").district("D1").inactive().build());

    let all = env.staff_api.list_employees(&ListFilter::default()).expect("查询失败");
    let names: Vec<&str> = all.iter().map(|e| e.full_name.as_str()).collect();
    assert_eq!(names, vec!["Anna", "Boris", "Hanna"]);

    let search = ListFilter {
        search: "ANN".to_string(),
        ..Default::default()
    };
    assert_eq!(env.staff_api.list_employees(&search).expect("查询失败").len(), 2);

    let d1_inactive = ListFilter {
        district_id: Some("D1".to_string()),
        status: StatusFilter::Inactive,
        ..Default::default()
    };
    let result = env.staff_api.list_employees(&d1_inactive).expect("查询失败");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "E3");
}

// ==========================================
// 门店
// ==========================================

fn draft(name: &str, opened_at: &str, closed_at: &str) -> StoreDraft {
    StoreDraft {
        name: name.to_string(),
        district_id: "D1".to_string(),
        is_active: true,
        opened_at: opened_at.to_string(),
        closed_at: closed_at.to_string(),
    }
}

#[test]
fn test_create_store_日期校验() {
    let env = ApiTestEnv::with_catalog().expect("无法创建测试环境");

    let store = env
        .store_api
        .create_store(&draft(" Central ", "2025-02-10", ""))
        .expect("创建失败");
    assert_eq!(store.name, "Central");
    assert_eq!(store.opened_at, Some(date("2025-02-10")));
    assert_eq!(store.closed_at, None);
    assert_eq!(store.company_id, COMPANY);

    assert!(matches!(
        env.store_api.create_store(&draft("Bad", "10.02.2025", "")),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        env.store_api.create_store(&draft("Inverted", "2025-03-01", "2025-02-01")),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        env.store_api.create_store(&draft("", "", "")),
        Err(ApiError::InvalidInput(_))
    ));

    // 同一天开业并关店是合法的
    env.store_api
        .create_store(&draft("OneDay", "2025-03-01", "2025-03-01"))
        .expect("创建失败");
}

#[test]
fn test_update_store() {
    let env = ApiTestEnv::with_catalog().expect("无法创建测试环境");
    let store = env.store_api.create_store(&draft("Central", "", "")).expect("创建失败");

    let mut changed = draft("Central", "", "2025-06-30");
    changed.district_id = "D2".to_string();
    changed.is_active = false;
    let updated = env.store_api.update_store(&store.id, &changed).expect("更新失败");
    assert_eq!(updated.district_id, "D2");
    assert_eq!(updated.closed_at, Some(date("2025-06-30")));
    assert!(!updated.is_active);

    let stored = env.store_repo.find_by_id(&store.id).expect("查询失败").expect("记录缺失");
    assert_eq!(stored, updated);

    assert!(matches!(
        env.store_api.update_store("S404", &changed),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn test_list_stores_筛选() {
    let env = ApiTestEnv::with_catalog().expect("无法创建测试环境");
    env.add_store(StoreBuilder::new("S1", "Central", "D1").build());
    env.add_store(StoreBuilder::new("S2", "East", "D1").inactive().build());
    env.add_store(StoreBuilder::new("S3", "Central South", "D2").build());

    let active_central = ListFilter {
        search: "central".to_string(),
        status: StatusFilter::Active,
        ..Default::default()
    };
    let ids: Vec<String> = env
        .store_api
        .list_stores(&active_central)
        .expect("查询失败")
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["S1", "S3"]);

    let d1 = ListFilter {
        district_id: Some("D1".to_string()),
        ..Default::default()
    };
    assert_eq!(env.store_api.list_stores(&d1).expect("查询失败").len(), 2);
}
