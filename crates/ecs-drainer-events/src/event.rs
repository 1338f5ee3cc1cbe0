//! Scale-in lifecycle event payload
//!
//! Field names and category strings match the AutoScaling lifecycle
//! notification format byte-for-byte; the serde renames below are
//! load-bearing.

use serde::{Deserialize, Serialize};

/// `detail-type` of an EC2 terminate lifecycle action event.
pub const DETAIL_TYPE_TERMINATE_LIFECYCLE: &str = "EC2 Instance-terminate Lifecycle Action";

/// `LifecycleTransition` value carried by scale-in (instance terminating) hooks.
pub const LIFECYCLE_TRANSITION_TERMINATING: &str = "autoscaling:EC2_INSTANCE_TERMINATING";

/// Detail payload of a terminate lifecycle action event.
///
/// `wait` is output-only: the drainer overwrites it on every successful
/// invocation, and the external poller reads it to decide whether to
/// re-invoke. All other fields pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleDetail {
    #[serde(rename = "AutoScalingGroupName", default)]
    pub auto_scaling_group_name: String,

    #[serde(rename = "EC2InstanceId", default)]
    pub ec2_instance_id: String,

    #[serde(rename = "LifecycleActionToken", default)]
    pub lifecycle_action_token: String,

    #[serde(rename = "LifecycleHookName", default)]
    pub lifecycle_hook_name: String,

    #[serde(rename = "LifecycleTransition", default)]
    pub lifecycle_transition: String,

    /// Continuation flag for the poller; always serialized, even when false.
    #[serde(rename = "Wait", default)]
    pub wait: bool,
}

impl LifecycleDetail {
    /// Whether this detail carries the scale-in (terminating) transition.
    pub fn is_terminating(&self) -> bool {
        self.lifecycle_transition == LIFECYCLE_TRANSITION_TERMINATING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> LifecycleDetail {
        LifecycleDetail {
            auto_scaling_group_name: "web-asg".to_string(),
            ec2_instance_id: "i-0123456789abcdef0".to_string(),
            lifecycle_action_token: "token-1234".to_string(),
            lifecycle_hook_name: "drain-hook".to_string(),
            lifecycle_transition: LIFECYCLE_TRANSITION_TERMINATING.to_string(),
            wait: false,
        }
    }

    #[test]
    fn serializes_verbatim_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "AutoScalingGroupName",
            "EC2InstanceId",
            "LifecycleActionToken",
            "LifecycleHookName",
            "LifecycleTransition",
            "Wait",
        ] {
            assert!(obj.contains_key(key), "missing key: {key}");
        }
        assert_eq!(obj.len(), 6);
    }

    #[test]
    fn wait_is_serialized_even_when_false() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["Wait"], json!(false));
    }

    #[test]
    fn wait_defaults_to_false_on_input() {
        let detail: LifecycleDetail = serde_json::from_value(json!({
            "AutoScalingGroupName": "web-asg",
            "EC2InstanceId": "i-0123456789abcdef0",
            "LifecycleActionToken": "token-1234",
            "LifecycleHookName": "drain-hook",
            "LifecycleTransition": LIFECYCLE_TRANSITION_TERMINATING,
        }))
        .unwrap();

        assert!(!detail.wait);
    }

    #[test]
    fn unknown_detail_keys_are_dropped_on_round_trip() {
        let detail: LifecycleDetail = serde_json::from_value(json!({
            "AutoScalingGroupName": "web-asg",
            "EC2InstanceId": "i-0123456789abcdef0",
            "LifecycleActionToken": "token-1234",
            "LifecycleHookName": "drain-hook",
            "LifecycleTransition": LIFECYCLE_TRANSITION_TERMINATING,
            "NotificationMetadata": "extra",
        }))
        .unwrap();

        let value = serde_json::to_value(&detail).unwrap();
        assert!(value.get("NotificationMetadata").is_none());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let detail: LifecycleDetail = serde_json::from_value(json!({})).unwrap();
        assert_eq!(detail.auto_scaling_group_name, "");
        assert_eq!(detail.ec2_instance_id, "");
        assert!(!detail.wait);
    }

    #[test]
    fn is_terminating_matches_transition() {
        assert!(sample().is_terminating());

        let mut launching = sample();
        launching.lifecycle_transition = "autoscaling:EC2_INSTANCE_LAUNCHING".to_string();
        assert!(!launching.is_terminating());
    }
}
