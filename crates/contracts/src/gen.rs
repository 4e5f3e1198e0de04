use ethers::contract::abigen;

abigen!(
    EntryPointAPI,
    r#"[
        struct UserOperation {address sender;uint256 nonce;bytes initCode;bytes callData;uint256 callGasLimit;uint256 verificationGasLimit;uint256 preVerificationGas;uint256 maxFeePerGas;uint256 maxPriorityFeePerGas;bytes paymasterAndData;bytes signature;}
        function getNonce(address sender, uint192 key) public view returns (uint256 nonce)
        function getSenderAddress(bytes memory initCode) external
        function getUserOpHash(UserOperation calldata userOp) external view returns (bytes32)
        function handleOps(UserOperation[] calldata ops,address payable beneficiary) external
        function balanceOf(address account) external view returns (uint256)
        function depositTo(address account) external payable
        error FailedOp(uint256 opIndex, string reason)
        error SenderAddressResult(address sender)
        error SignatureValidationFailed(address aggregator)
        event UserOperationEvent(bytes32 indexed userOpHash,address indexed sender,address indexed paymaster,uint256 nonce,bool success,uint256 actualGasCost,uint256 actualGasUsed)
        event AccountDeployed(bytes32 indexed userOpHash,address indexed sender,address factory,address paymaster)
    ]"#
);

abigen!(
    SimpleAccountFactory,
    r#"[
        function createAccount(address owner,uint256 salt) public returns (address)
        function getAddress(address owner,uint256 salt) public view returns (address)
    ]"#
);

abigen!(
    SimpleAccount,
    r#"[
        function execute(address dest,uint256 value,bytes calldata func) external
        function executeBatch(address[] calldata dest,bytes[] calldata func) external
    ]"#
);

abigen!(
    BarzFactory,
    r#"[
        function createAccount(address verificationFacet,bytes calldata owner,uint256 salt) external payable returns (address)
    ]"#
);
