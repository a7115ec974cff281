//! Bindings for the subset of the Reliquary staking contract that is read by
//! this crate.

alloy::sol! {
    #[sol(rpc)]
    interface IReliquary {
        struct PositionInfo {
            uint256 amount;
            uint256 rewardDebt;
            uint256 rewardCredit;
            uint256 entry;
            uint256 poolId;
            uint256 level;
            uint256 genesis;
            uint256 lastMaturityBonus;
        }

        struct LevelInfo {
            uint256[] requiredMaturity;
            uint256[] allocPoint;
            uint256[] balance;
        }

        struct PendingReward {
            uint256 relicId;
            uint256 poolId;
            uint256 pendingReward;
        }

        function getPositionForId(uint256 relicId) external view returns (PositionInfo memory);
        function levelOnUpdate(uint256 relicId) external view returns (uint256 level);
        function getLevelInfo(uint256 pid) external view returns (LevelInfo memory);
        function pendingReward(uint256 relicId) external view returns (uint256 pending);
        function pendingRewardsOfOwner(address owner) external view returns (PendingReward[] memory pendingRewards);
        function relicPositionsOfOwner(address owner) external view returns (uint256[] memory relicIds, PositionInfo[] memory positionInfos);
    }
}
