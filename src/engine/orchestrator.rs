// ==========================================
// 陈列活动奖励评估 - 评估编排器
// ==========================================
// 流程: Start → RegistrationChecked → CriteriaLoaded → Scored → Finalized
// 1. 登记检查 (未登记 → 直接终止)
// 2. 加载条件与条件组 (无条件 → 直接终止)
// 3. 一次性加载客户当期测量值并按条件代码索引
// 4. 按组号升序逐组评分, 累计得分/满分/失败原因
// 5. meets_criteria = 无失败原因 AND 各组均通过
// 6. eligible_for_reward = meets_criteria AND 登记有效
// ==========================================
// 红线: 不写库、无全局状态; 数据源通过构造函数注入
// 红线: 数据源读取失败原样上抛, 不重试、不伪装成业务结果
// ==========================================

use crate::domain::{EvaluationOutcome, EvaluationResult, EvaluationStage, Period};
use crate::engine::audit_lookup::AuditLookup;
use crate::engine::criteria_model::CriteriaModel;
use crate::engine::error::{EvaluationError, FeedKind};
use crate::engine::group_scorer::GroupScorer;
use crate::engine::registration_check::{RegistrationCheck, RegistrationStatus};
use crate::repository::{AuditFeed, CriteriaFeed, RegistrationFeed};
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// EvaluationEngine - 客户活动评估引擎
// ==========================================
// 每次调用相互独立, 调用方可对不同 (期间, 客户, 活动) 并行评估
pub struct EvaluationEngine<R, C, A>
where
    R: RegistrationFeed,
    C: CriteriaFeed,
    A: AuditFeed,
{
    registrations: Arc<R>,
    criteria: Arc<C>,
    audits: Arc<A>,
}

impl<R, C, A> Clone for EvaluationEngine<R, C, A>
where
    R: RegistrationFeed,
    C: CriteriaFeed,
    A: AuditFeed,
{
    fn clone(&self) -> Self {
        Self {
            registrations: Arc::clone(&self.registrations),
            criteria: Arc::clone(&self.criteria),
            audits: Arc::clone(&self.audits),
        }
    }
}

impl<R, C, A> EvaluationEngine<R, C, A>
where
    R: RegistrationFeed,
    C: CriteriaFeed,
    A: AuditFeed,
{
    /// 创建评估引擎
    ///
    /// # 参数
    /// - registrations: 活动登记数据源
    /// - criteria: 考核条件数据源 (条件 + 条件组)
    /// - audits: 巡店测量数据源
    pub fn new(registrations: Arc<R>, criteria: Arc<C>, audits: Arc<A>) -> Self {
        Self {
            registrations,
            criteria,
            audits,
        }
    }

    /// 评估客户在某期间某活动的奖励资格
    ///
    /// # 返回
    /// - Ok(EvaluationResult): 四种终态 (未登记/无条件/未达标/达标) 均为正常结果
    /// - Err(EvaluationError::DataAccess): 任一数据源读取失败, 或条件分值累加溢出
    #[instrument(skip(self), fields(period = %period))]
    pub fn evaluate_customer(
        &self,
        period: Period,
        customer_code: &str,
        program_code: &str,
    ) -> Result<EvaluationResult, EvaluationError> {
        let mut stage = EvaluationStage::Start;
        debug!(%stage, "开始评估");

        // === 步骤 1: 登记检查 ===
        let registrations = self
            .registrations
            .get_registrations(period, customer_code)
            .map_err(EvaluationError::data_access(FeedKind::Registrations))?;

        let status = RegistrationCheck::check(&registrations, period, customer_code, program_code);
        if status == RegistrationStatus::NotRegistered {
            stage = EvaluationStage::Finalized;
            info!(%stage, outcome = %EvaluationOutcome::NotRegistered, "客户未登记该活动");
            return Ok(EvaluationResult::not_registered(
                period,
                customer_code,
                program_code,
            ));
        }
        let registration_active = status.is_active();
        stage = EvaluationStage::RegistrationChecked;
        debug!(%stage, registration_active, "登记检查通过");

        // === 步骤 2: 加载考核条件 ===
        let items = self
            .criteria
            .get_condition_items(period, program_code)
            .map_err(EvaluationError::data_access(FeedKind::ConditionItems))?;

        if items.is_empty() {
            stage = EvaluationStage::Finalized;
            info!(%stage, outcome = %EvaluationOutcome::NoConditionsDefined, "活动未配置考核条件");
            return Ok(EvaluationResult::no_conditions_defined(
                period,
                customer_code,
                program_code,
                registration_active,
            ));
        }

        let groups = self
            .criteria
            .get_condition_groups(period, program_code)
            .map_err(EvaluationError::data_access(FeedKind::ConditionGroups))?;

        let model = match CriteriaModel::build(period, program_code, items, groups) {
            Some(model) => model,
            None => {
                // 数据源返回的条件全部不属于该期间/活动
                stage = EvaluationStage::Finalized;
                info!(%stage, outcome = %EvaluationOutcome::NoConditionsDefined, "活动未配置考核条件");
                return Ok(EvaluationResult::no_conditions_defined(
                    period,
                    customer_code,
                    program_code,
                    registration_active,
                ));
            }
        };
        stage = EvaluationStage::CriteriaLoaded;
        debug!(
            %stage,
            groups = model.groups().len(),
            conditions = model.condition_count(),
            "考核条件已加载"
        );

        // === 步骤 3: 加载测量值 ===
        let measurements = self
            .audits
            .get_audit_measurements(period, customer_code)
            .map_err(EvaluationError::data_access(FeedKind::AuditMeasurements))?;
        let audits = AuditLookup::build(period, customer_code, measurements);
        if audits.is_empty() {
            debug!("客户当期无测量记录");
        } else {
            debug!(measured_conditions = audits.len(), "测量记录已索引");
        }

        let ignored = audits
            .condition_codes()
            .filter(|code| !model.is_configured(code))
            .count();
        if ignored > 0 {
            debug!(ignored, "忽略未配置条件的测量记录");
        }

        // === 步骤 4: 逐组评分 ===
        let mut total_points: i64 = 0;
        let mut max_possible_points: i64 = 0;
        let mut failure_reasons = Vec::new();
        let mut group_outcomes = Vec::with_capacity(model.groups().len());

        for group in model.groups() {
            let score = GroupScorer::score(group, &audits)?;
            debug!(
                group_no = score.outcome.group_no,
                configured = group.configured,
                earned = score.outcome.points_earned,
                possible = score.outcome.points_possible,
                group_point = score.outcome.group_point,
                passed = score.outcome.passed,
                "组评分完成"
            );

            total_points = total_points
                .checked_add(score.outcome.points_earned)
                .ok_or_else(|| EvaluationError::points_overflow(group.group_no))?;
            max_possible_points = max_possible_points
                .checked_add(score.outcome.points_possible)
                .ok_or_else(|| EvaluationError::points_overflow(group.group_no))?;
            failure_reasons.extend(score.failures);
            group_outcomes.push(score.outcome);
        }
        stage = EvaluationStage::Scored;
        debug!(%stage, total_points, max_possible_points, "评分完成");

        // === 步骤 5: 最终判定 ===
        let all_groups_passed = group_outcomes.iter().all(|g| g.passed);
        let meets_criteria = failure_reasons.is_empty() && all_groups_passed;
        let outcome = if meets_criteria {
            EvaluationOutcome::Success
        } else {
            EvaluationOutcome::CriteriaNotMet
        };

        let result = EvaluationResult {
            period,
            customer_code: customer_code.to_string(),
            program_code: program_code.to_string(),
            total_points,
            max_possible_points,
            groups: group_outcomes,
            meets_criteria,
            failure_reasons,
            registration_active,
            outcome,
        };

        stage = EvaluationStage::Finalized;
        info!(
            %stage,
            %outcome,
            total_points,
            max_possible_points,
            eligible = result.eligible_for_reward(),
            "评估完成"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuditMeasurement, ConditionItem, CriteriaGroup, RegistrationRecord};
    use crate::repository::{RepositoryError, RepositoryResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==========================================
    // Mock 数据源
    // ==========================================
    #[derive(Default)]
    struct MockFeeds {
        registrations: Vec<RegistrationRecord>,
        items: Vec<ConditionItem>,
        groups: Vec<CriteriaGroup>,
        audits: Vec<AuditMeasurement>,
        fail_feed: Option<FeedKind>,
        reads: AtomicUsize,
    }

    impl MockFeeds {
        fn read(&self, feed: FeedKind) -> RepositoryResult<()> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail_feed == Some(feed) {
                return Err(RepositoryError::DatabaseBusy(format!("{} timeout", feed)));
            }
            Ok(())
        }
    }

    impl RegistrationFeed for MockFeeds {
        fn get_registrations(
            &self,
            _period: Period,
            _customer_code: &str,
        ) -> RepositoryResult<Vec<RegistrationRecord>> {
            self.read(FeedKind::Registrations)?;
            Ok(self.registrations.clone())
        }
    }

    impl CriteriaFeed for MockFeeds {
        fn get_condition_items(
            &self,
            _period: Period,
            _program_code: &str,
        ) -> RepositoryResult<Vec<ConditionItem>> {
            self.read(FeedKind::ConditionItems)?;
            Ok(self.items.clone())
        }

        fn get_condition_groups(
            &self,
            _period: Period,
            _program_code: &str,
        ) -> RepositoryResult<Vec<CriteriaGroup>> {
            self.read(FeedKind::ConditionGroups)?;
            Ok(self.groups.clone())
        }
    }

    impl AuditFeed for MockFeeds {
        fn get_audit_measurements(
            &self,
            _period: Period,
            _customer_code: &str,
        ) -> RepositoryResult<Vec<AuditMeasurement>> {
            self.read(FeedKind::AuditMeasurements)?;
            Ok(self.audits.clone())
        }
    }

    // ==========================================
    // 测试辅助函数
    // ==========================================
    fn period() -> Period {
        Period::new(202501).unwrap()
    }

    fn registration(active: bool) -> RegistrationRecord {
        RegistrationRecord {
            period: period(),
            program_code: "PRG01".to_string(),
            customer_code: "CUST001".to_string(),
            display_type: "KE_3_O".to_string(),
            register_qty: 1,
            active,
        }
    }

    fn item(group_no: i32, code: &str, min_value: i64, point: i64) -> ConditionItem {
        ConditionItem {
            period: period(),
            program_code: "PRG01".to_string(),
            group_no,
            condition_code: code.to_string(),
            min_value,
            point,
        }
    }

    fn group(group_no: i32, group_point: i64) -> CriteriaGroup {
        CriteriaGroup {
            period: period(),
            program_code: "PRG01".to_string(),
            group_no,
            type_code: "TYPE_BEVERAGE".to_string(),
            group_point,
        }
    }

    fn audit(code: &str, raw: &str) -> AuditMeasurement {
        AuditMeasurement {
            period: period(),
            customer_code: "CUST001".to_string(),
            condition_code: code.to_string(),
            raw_value: raw.to_string(),
            measured_at: None,
        }
    }

    fn engine(feeds: MockFeeds) -> (EvaluationEngine<MockFeeds, MockFeeds, MockFeeds>, Arc<MockFeeds>) {
        let feeds = Arc::new(feeds);
        (
            EvaluationEngine::new(feeds.clone(), feeds.clone(), feeds.clone()),
            feeds,
        )
    }

    // ==========================================
    // 测试用例
    // ==========================================

    #[test]
    fn test_not_registered_short_circuits() {
        let (engine, feeds) = engine(MockFeeds {
            items: vec![item(1, "A", 1, 1)],
            groups: vec![group(1, 1)],
            audits: vec![audit("A", "5")],
            ..Default::default()
        });

        let result = engine.evaluate_customer(period(), "CUST001", "PRG01").unwrap();
        assert_eq!(result.outcome, EvaluationOutcome::NotRegistered);
        assert_eq!(result.failure_tokens(), vec!["NOT_REGISTERED"]);
        assert_eq!(feeds.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_conditions_skips_remaining_reads() {
        let (engine, feeds) = engine(MockFeeds {
            registrations: vec![registration(false)],
            groups: vec![group(1, 1)],
            ..Default::default()
        });

        let result = engine.evaluate_customer(period(), "CUST001", "PRG01").unwrap();
        assert_eq!(result.outcome, EvaluationOutcome::NoConditionsDefined);
        assert_eq!(result.failure_tokens(), vec!["NO_CONDITIONS_DEFINED"]);
        assert!(!result.registration_active);
        assert_eq!(feeds.reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failures_ordered_by_group_then_item() {
        let (engine, _) = engine(MockFeeds {
            registrations: vec![registration(true)],
            items: vec![
                item(2, "G2_A", 10, 5),
                item(1, "G1_B", 10, 5),
                item(1, "G1_A", 10, 5),
            ],
            groups: vec![group(2, 5), group(1, 5)],
            audits: vec![audit("G1_A", "1"), audit("G2_A", "x"), audit("UNRELATED", "100")],
            ..Default::default()
        });

        let result = engine.evaluate_customer(period(), "CUST001", "PRG01").unwrap();
        assert_eq!(
            result.failure_tokens(),
            vec!["G1_B_NOT_AUDITED", "G1_A_BELOW_MINIMUM(1<10)", "G2_A_INVALID_VALUE"]
        );
        assert_eq!(result.total_points, 0);
        assert_eq!(result.max_possible_points, 15);
        assert_eq!(result.groups.iter().map(|g| g.group_no).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(result.outcome, EvaluationOutcome::CriteriaNotMet);
    }

    #[test]
    fn test_group_threshold_above_maximum_fails_without_tokens() {
        let (engine, _) = engine(MockFeeds {
            registrations: vec![registration(true)],
            items: vec![item(1, "A", 1, 10)],
            groups: vec![group(1, 50)],
            audits: vec![audit("A", "5")],
            ..Default::default()
        });

        let result = engine.evaluate_customer(period(), "CUST001", "PRG01").unwrap();
        assert!(result.failure_reasons.is_empty());
        assert!(!result.meets_criteria);
        assert!(!result.eligible_for_reward());
        assert_eq!(result.total_points, 10);
        assert_eq!(result.groups[0].group_point, 50);
    }

    #[test]
    fn test_audit_feed_failure_propagates() {
        let (engine, _) = engine(MockFeeds {
            registrations: vec![registration(true)],
            items: vec![item(1, "A", 1, 10)],
            groups: vec![group(1, 10)],
            fail_feed: Some(FeedKind::AuditMeasurements),
            ..Default::default()
        });

        let err = engine
            .evaluate_customer(period(), "CUST001", "PRG01")
            .unwrap_err();
        assert_eq!(err.feed(), FeedKind::AuditMeasurements);
        assert!(matches!(
            err,
            EvaluationError::DataAccess {
                source: RepositoryError::DatabaseBusy(_),
                ..
            }
        ));
    }

    fn failing_engine(
        feed: FeedKind,
    ) -> (EvaluationEngine<MockFeeds, MockFeeds, MockFeeds>, Arc<MockFeeds>) {
        engine(MockFeeds {
            registrations: vec![registration(true)],
            items: vec![item(1, "A", 1, 10)],
            groups: vec![group(1, 10)],
            audits: vec![audit("A", "5")],
            fail_feed: Some(feed),
            ..Default::default()
        })
    }

    #[test]
    fn test_registration_feed_failure_is_not_not_registered() {
        let (engine, feeds) = failing_engine(FeedKind::Registrations);

        let outcome = engine.evaluate_customer(period(), "CUST001", "PRG01");

        let err = match outcome {
            Ok(result) => panic!("登记读取失败不应返回结果: {:?}", result.outcome),
            Err(err) => err,
        };
        assert_eq!(err.feed(), FeedKind::Registrations);
        assert!(matches!(
            err,
            EvaluationError::DataAccess {
                source: RepositoryError::DatabaseBusy(_),
                ..
            }
        ));
        assert_eq!(feeds.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_condition_items_feed_failure_is_not_no_conditions() {
        let (engine, feeds) = failing_engine(FeedKind::ConditionItems);

        let err = engine
            .evaluate_customer(period(), "CUST001", "PRG01")
            .unwrap_err();

        assert_eq!(err.feed(), FeedKind::ConditionItems);
        assert_eq!(feeds.reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_condition_groups_feed_failure_propagates() {
        let (engine, feeds) = failing_engine(FeedKind::ConditionGroups);

        let err = engine
            .evaluate_customer(period(), "CUST001", "PRG01")
            .unwrap_err();

        assert_eq!(err.feed(), FeedKind::ConditionGroups);
        assert_eq!(feeds.reads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_point_overflow_is_data_access_error() {
        let (engine, _) = engine(MockFeeds {
            registrations: vec![registration(true)],
            items: vec![item(1, "A", 1, i64::MAX), item(1, "B", 1, 1)],
            groups: vec![group(1, 1)],
            audits: vec![audit("A", "5"), audit("B", "5")],
            ..Default::default()
        });

        let err = engine
            .evaluate_customer(period(), "CUST001", "PRG01")
            .unwrap_err();

        assert_eq!(err.feed(), FeedKind::ConditionItems);
        assert!(matches!(
            err,
            EvaluationError::DataAccess {
                source: RepositoryError::MalformedRecord(_),
                ..
            }
        ));
    }

    #[test]
    fn test_point_overflow_across_groups_is_data_access_error() {
        let (engine, _) = engine(MockFeeds {
            registrations: vec![registration(true)],
            items: vec![item(1, "A", 1, i64::MAX), item(2, "B", 1, 1)],
            groups: vec![group(1, 1), group(2, 1)],
            audits: vec![audit("A", "5"), audit("B", "5")],
            ..Default::default()
        });

        let err = engine
            .evaluate_customer(period(), "CUST001", "PRG01")
            .unwrap_err();

        assert_eq!(err.feed(), FeedKind::ConditionItems);
    }
}
